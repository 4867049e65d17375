mod display;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use atos_client::{AtosClient, RecordForm};
use atos_core::AtoForm;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "atos", version, about = "Registry client for atos normativos")]
struct Cli {
    #[command(flatten)]
    api: ApiArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct ApiArgs {
    /// API base URL, e.g. http://localhost:3333
    #[arg(long, env = "ATOS_API_URL", global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds (none by default)
    #[arg(long, env = "ATOS_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register a new ato
    Novo(NovoArgs),
    /// Show one ato as a card
    Ficha {
        /// Ato id
        id: i64,
    },
    /// User management
    Usuarios,
    /// List accepted tipo and situação values
    Tipos,
}

/// One flag per form control. Text flags left out submit an empty string,
/// as an untouched text box does; tipo and situação have no such default.
#[derive(Debug, Args)]
struct NovoArgs {
    #[arg(long)]
    numero: Option<String>,
    #[arg(long)]
    titulo: Option<String>,
    #[arg(long)]
    ementa: Option<String>,
    /// Tipo, by value or label (see `atos tipos`)
    #[arg(long = "tipo")]
    tipo_id: Option<String>,
    /// Situação, by value or label (see `atos tipos`)
    #[arg(long)]
    situacao: Option<String>,
    #[arg(long)]
    fonte: Option<String>,
    /// YYYY-MM-DD, dd/mm/yyyy, or an RFC 3339 timestamp
    #[arg(long)]
    data_ato: Option<String>,
    /// YYYY-MM-DD, dd/mm/yyyy, or an RFC 3339 timestamp
    #[arg(long)]
    data_publicacao: Option<String>,
    #[arg(long)]
    descritores: Option<String>,
    #[arg(long, conflicts_with = "observacao_file")]
    observacao: Option<String>,
    /// Read the remark markup from a file
    #[arg(long)]
    observacao_file: Option<PathBuf>,
    #[arg(long, conflicts_with = "conteudo_file")]
    conteudo: Option<String>,
    /// Read the body markup from a file
    #[arg(long)]
    conteudo_file: Option<PathBuf>,
}

impl NovoArgs {
    fn into_form(self) -> anyhow::Result<AtoForm> {
        Ok(AtoForm {
            numero: or_empty(self.numero),
            titulo: or_empty(self.titulo),
            ementa: or_empty(self.ementa),
            tipo_id: self.tipo_id,
            situacao: self.situacao,
            fonte: or_empty(self.fonte),
            data_ato: self.data_ato,
            data_publicacao: self.data_publicacao,
            descritores: or_empty(self.descritores),
            observacao: or_empty(text_or_file(self.observacao, self.observacao_file)?),
            conteudo: or_empty(text_or_file(self.conteudo, self.conteudo_file)?),
        })
    }
}

fn or_empty(text: Option<String>) -> Option<String> {
    Some(text.unwrap_or_default())
}

fn text_or_file(text: Option<String>, file: Option<PathBuf>) -> anyhow::Result<Option<String>> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))
            .map(Some),
        None => Ok(text),
    }
}

impl ApiArgs {
    fn client(&self) -> anyhow::Result<AtosClient> {
        let base_url = self
            .api_url
            .clone()
            .context("no API URL: pass --api-url or set ATOS_API_URL")?;
        match self.timeout_secs {
            Some(secs) => AtosClient::with_timeout(base_url, Duration::from_secs(secs))
                .context("building HTTP client"),
            None => Ok(AtosClient::new(base_url)),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("atos v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Novo(args) => novo(cli.api.client()?, args.into_form()?).await,
        Command::Ficha { id } => {
            let ato = cli
                .api
                .client()?
                .get_ato(id)
                .await
                .with_context(|| format!("fetching ato {id}"))?;
            display::print_ato_card(&ato);
            Ok(ExitCode::SUCCESS)
        }
        Command::Usuarios => {
            print!("{}", display::render_user_management());
            Ok(ExitCode::SUCCESS)
        }
        Command::Tipos => {
            print!("{}", display::render_label_tables());
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn novo(client: AtosClient, values: AtoForm) -> anyhow::Result<ExitCode> {
    let form = RecordForm::with_values(client, values);
    match form.submit().await {
        Ok(done) => {
            println!("{}", done.message());
            if let Some(id) = done.response.get("id") {
                println!("  id: {id}");
            }
            println!("  -> {}", done.redirect);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
