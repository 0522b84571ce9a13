use anyhow::{Context, Result};
use kubegen_core::GenerateRequest;
use std::{
    env, fs,
    io::{self, Read},
};

const USAGE: &str = "Usage: kubegenctl <request.json|-> [output.yaml] [--strict] [--remote <url>]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    input: String,
    output: Option<String>,
    strict: bool,
    remote: Option<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut positional = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--strict" => parsed.strict = true,
            "--remote" => {
                let url = args.next().context("--remote needs a URL")?;
                parsed.remote = Some(url);
            }
            flag if flag.starts_with("--") => anyhow::bail!("unknown flag: {flag}"),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    parsed.input = positional.next().context("missing request file")?;
    parsed.output = positional.next();
    if let Some(extra) = positional.next() {
        anyhow::bail!("unexpected argument: {extra}");
    }
    Ok(parsed)
}

fn read_request(input: &str) -> Result<String> {
    if input == "-" {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("reading request from stdin")?;
        Ok(raw)
    } else {
        fs::read_to_string(input).with_context(|| format!("reading {input}"))
    }
}

fn generate_local(raw: &str, strict: bool) -> Result<String> {
    let request: GenerateRequest = serde_json::from_str(raw).context("parsing JSON")?;
    let manifest = if strict {
        kubegen_core::generate_exclusive(request)
    } else {
        kubegen_core::generate(request)
    };
    manifest.context("generating manifest")
}

/// Strict mode is a server setting; a remote server applies its own.
fn generate_remote(raw: String, base_url: &str) -> Result<String> {
    let url = format!("{}/generate", base_url.trim_end_matches('/'));
    let response = reqwest::blocking::Client::new()
        .post(&url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(raw)
        .send()
        .with_context(|| format!("POST {url}"))?;

    let status = response.status();
    let body = response.text().context("reading response body")?;
    if !status.is_success() {
        anyhow::bail!("server returned {status}: {}", body.trim_end());
    }
    Ok(body)
}

fn main() -> Result<()> {
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            std::process::exit(1);
        }
    };

    let raw = read_request(&args.input)?;
    let remote = args
        .remote
        .or_else(|| env::var("KUBEGEN_URL").ok().filter(|url| !url.is_empty()));

    let manifest = match remote {
        Some(url) => generate_remote(raw, &url)?,
        None => generate_local(&raw, args.strict)?,
    };

    match args.output {
        Some(path) => {
            fs::write(&path, &manifest).with_context(|| format!("writing {path}"))?;
            eprintln!("✔ wrote manifest to {path}");
        }
        None => print!("{manifest}"),
    }
    Ok(())
}
