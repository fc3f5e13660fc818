//! Command line front end for the product API.
//!
//! ```text
//! productos list --categoria Bebidas --precio-max 10
//! productos create --nombre "Café" --precio 12.50 --stock 3
//! productos search cafe
//! ```

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use productos::client::{ProductApiClient, StateContainer, DEFAULT_API_URL};
use productos::forms::{NumericInput, ProductFilterQuery, ProductForm};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "productos", version, about = "Manage the product catalogue over HTTP")]
struct Cli {
    /// API root, e.g. http://localhost:3000/api
    #[arg(long, env = "PRODUCTOS_API_URL", default_value = DEFAULT_API_URL, global = true)]
    url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List active products, newest first
    List {
        #[arg(long)]
        categoria: Option<String>,
        #[arg(long)]
        nombre: Option<String>,
        #[arg(long)]
        precio_min: Option<String>,
        #[arg(long)]
        precio_max: Option<String>,
    },
    /// Show one product
    Get { id: i32 },
    /// Create a product
    Create(ProductArgs),
    /// Change the given fields of a product
    Update {
        id: i32,
        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Deactivate a product
    Delete { id: i32 },
    /// List distinct categories
    Categories,
    /// Search name, description and category
    Search { termino: String },
}

#[derive(Debug, Args)]
struct ProductArgs {
    #[arg(long)]
    nombre: Option<String>,
    #[arg(long)]
    descripcion: Option<String>,
    #[arg(long)]
    precio: Option<String>,
    #[arg(long)]
    categoria: Option<String>,
    #[arg(long)]
    stock: Option<String>,
    #[arg(long)]
    imagen_url: Option<String>,
}

impl From<ProductArgs> for ProductForm {
    fn from(args: ProductArgs) -> Self {
        ProductForm {
            nombre: args.nombre,
            descripcion: args.descripcion,
            precio: args.precio.map(NumericInput::Text),
            categoria: args.categoria,
            stock: args.stock.map(NumericInput::Text),
            imagen_url: args.imagen_url,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let api = ProductApiClient::new(&cli.url)
        .with_context(|| format!("invalid API url {}", cli.url))?;
    let container = StateContainer::new(api);

    match cli.command {
        Commands::List {
            categoria,
            nombre,
            precio_min,
            precio_max,
        } => {
            container
                .update_filters(ProductFilterQuery {
                    categoria,
                    nombre,
                    precio_min,
                    precio_max,
                })
                .await;
            let productos = container.refresh().await?;
            print_json(&productos)?;
            eprintln!("{} producto(s)", productos.len());
        }
        Commands::Get { id } => print_json(&container.load_product(id).await?)?,
        Commands::Create(args) => {
            let form = ProductForm::from(args);
            print_json(&container.create_product(&form).await?)?;
        }
        Commands::Update { id, fields } => {
            let form = ProductForm::from(fields);
            print_json(&container.update_product(id, &form).await?)?;
        }
        Commands::Delete { id } => print_json(&container.delete_product(id).await?)?,
        Commands::Categories => print_json(&container.load_categories().await?)?,
        Commands::Search { termino } => print_json(&container.search_products(&termino).await?)?,
    }

    Ok(())
}
