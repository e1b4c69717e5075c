//! OpenAI command - one request against the OpenAI REST API

use clap::Args;
use reqwest::Method;
use serde_json::Value;

use crate::infrastructure::openai::OpenAiClient;

#[derive(Args, Clone, Debug)]
pub struct OpenAiArgs {
    /// Endpoint path, e.g. `/models`
    pub endpoint: String,

    /// HTTP method
    #[arg(long, default_value = "GET")]
    pub method: String,

    /// JSON request body
    #[arg(long)]
    pub body: Option<String>,
}

pub async fn run(args: OpenAiArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let api_key = config
        .openai
        .api_key
        .clone()
        .unwrap_or_default();
    let client = OpenAiClient::with_base_url(api_key, &config.openai.base_url)?;

    let (method, body) = parse_request(&args)?;
    let response = client.request(method, &args.endpoint, body.as_ref()).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

fn parse_request(args: &OpenAiArgs) -> anyhow::Result<(Method, Option<Value>)> {
    let method = Method::from_bytes(args.method.to_uppercase().as_bytes())
        .map_err(|_| anyhow::anyhow!("Invalid HTTP method: {}", args.method))?;

    let body = args
        .body
        .as_deref()
        .map(serde_json::from_str::<Value>)
        .transpose()
        .map_err(|e| anyhow::anyhow!("Invalid JSON body: {}", e))?;

    Ok((method, body))
}
