use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .ok_or("usage: client <soil-report.pdf> [base-url]")?;
    let base_url = env::args()
        .nth(2)
        .unwrap_or_else(|| "http://127.0.0.1:5000".to_string());

    let client = Client::new();

    println!("Health check:");
    let health_response = client.get(format!("{}/health", base_url)).send().await?;
    println!("Status: {}", health_response.status());

    let bytes = tokio::fs::read(&path).await?;
    let filename = std::path::Path::new(&path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "report.pdf".to_string());

    let form = Form::new().part(
        "file",
        Part::bytes(bytes)
            .file_name(filename)
            .mime_str("application/pdf")?,
    );

    println!("\nAnalyzing {}:", path);
    let response = client
        .post(format!("{}/analyze-soil-report", base_url))
        .multipart(form)
        .send()
        .await?;

    println!("Status: {}", response.status());
    let body: serde_json::Value = response.json().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);

    Ok(())
}
