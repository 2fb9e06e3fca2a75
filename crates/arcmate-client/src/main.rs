//! Arcmate client demo.
//!
//! Runs a scripted session against the embedded mock backend: log in,
//! open a repository, list document types, search, add a document, and
//! log out.
//!
//! ```bash
//! arcmate-client --user alice --text invoice
//! arcmate-client --amount 500
//! arcmate-client --doc-type 2
//! ```

use anyhow::Context;
use arcmate_client::{ApiClient, ClientConfig, LoginRequest};
use clap::Parser;
use serde_json::json;

#[derive(Parser, Debug)]
#[command(name = "arcmate-client")]
#[command(author, version, about = "Arcmate document repository client (mock backend)")]
struct Args {
    /// Path to a YAML config file
    #[arg(short, long, env = "ARCMATE_CONFIG")]
    config: Option<String>,

    /// User name to log in with
    #[arg(short, long, default_value = "demo")]
    user: String,

    /// Free-text search term
    #[arg(short, long)]
    text: Option<String>,

    /// Exact amount filter
    #[arg(long)]
    amount: Option<f64>,

    /// Document type id filter
    #[arg(long)]
    doc_type: Option<String>,

    /// Title for the document added during the demo run
    #[arg(long)]
    add_title: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };

    let client = ApiClient::new(&config);

    let login_id = client
        .login(&LoginRequest {
            user_name: args.user.clone(),
            password: "demo".to_string(),
            ip_address: "127.0.0.1".to_string(),
        })
        .await
        .context("login failed")?;
    println!("logged in as {} ({login_id})", args.user);

    let repos = client.get_repos().await.context("listing repositories failed")?;
    println!("repositories:");
    for repo in &repos {
        println!("  [{}] {}", repo.repository_id, repo.name);
    }
    if let Some(repo) = repos.first() {
        client
            .open_repo(&repo.repository_id)
            .await
            .context("opening repository failed")?;
        println!("opened repository {}", repo.name);
    }

    let types = client
        .document_types()
        .await
        .context("listing document types failed")?;
    println!(
        "document types: {}",
        types
            .iter()
            .map(|t| format!("{} ({})", t.name, t.id))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let query = json!({
        "Text": args.text,
        "Amount": args.amount,
        "DocTypeId": args.doc_type,
    });
    let results = client.search(query.clone()).await.context("search failed")?;
    print_results(&results);

    if let Some(title) = &args.add_title {
        let outcome = client
            .add_document(json!({ "Title": title, "Required": true }))
            .await
            .context("adding document failed")?;
        if let Some(created) = outcome.created {
            println!("added document {} ({})", created.title, created.document_id);
        }
        let results = client.search(query).await.context("search failed")?;
        print_results(&results);
    }

    client.logout().await.context("logout failed")?;
    println!("logged out");
    Ok(())
}

fn print_results(results: &[arcmate_client::Document]) {
    if results.is_empty() {
        println!("no results found");
        return;
    }
    println!("{} result(s):", results.len());
    for doc in results {
        println!(
            "  {:<8} {:<24} {:<10} {:>10.2}  {}",
            doc.document_id, doc.title, doc.type_name, doc.amount, doc.date
        );
    }
}
