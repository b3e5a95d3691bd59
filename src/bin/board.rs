use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use order_board_api::{
    config::AppConfig,
    identity::FederatedProvider,
    models::{OrderStatus, ProductLine, ProductName},
    services::auth_service::AuthFlow,
    session::FileTokenStorage,
    state::AppState,
    views::{
        auth::{LoginForm, RegisterForm},
        board::{BoardColumns, OrderBoard},
        order_form::OrderForm,
    },
};

/// Terminal client for the order board.
#[derive(Parser, Debug)]
#[command(name = "board")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in with Google.
    Google,
    Logout,
    /// Print the three status columns.
    Show,
    Create {
        #[arg(long, default_value = "")]
        description: String,
        /// Product line as `NAME:QUANTITY`, e.g. `Olma:2`. Repeatable.
        #[arg(long = "product", value_parser = parse_product)]
        products: Vec<ProductLine>,
    },
    Edit {
        id: Uuid,
        #[arg(long)]
        description: Option<String>,
        /// Replaces every product line when given.
        #[arg(long = "product", value_parser = parse_product)]
        products: Vec<ProductLine>,
    },
    Move {
        id: Uuid,
    },
    Delete {
        id: Uuid,
    },
}

fn parse_product(arg: &str) -> Result<ProductLine, String> {
    let (name, quantity) = match arg.split_once(':') {
        Some((name, quantity)) => (
            name,
            quantity
                .parse::<i64>()
                .map_err(|e| format!("bad quantity `{quantity}`: {e}"))?,
        ),
        None => (arg, 1),
    };
    let name: ProductName = name.parse().map_err(|e| format!("{e}"))?;
    Ok(ProductLine::new(name, quantity))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    if config.database_url.is_none() {
        anyhow::bail!("DATABASE_URL must be set; the board client has nothing to show otherwise");
    }
    let state = AppState::from_config(&config).await?;
    let auth = AuthFlow::new(
        state.identity.clone(),
        state.store.clone(),
        Arc::new(FileTokenStorage::new(&config.token_file)),
    );

    match cli.command {
        Command::Register {
            name,
            email,
            password,
        } => {
            let route = auth
                .register(&RegisterForm::new(name, email, password))
                .await?;
            println!("Registered. Continue at {}", route.path());
        }
        Command::Login { email, password } => {
            let outcome = auth.login(&LoginForm::new(email, password)).await?;
            println!("Logged in. Continue at {}", outcome.route.path());
        }
        Command::Google => {
            let route = auth.sign_in_federated(FederatedProvider::Google).await?;
            println!("Signed in. Continue at {}", route.path());
        }
        Command::Logout => {
            auth.logout().await?;
            println!("Logged out");
        }
        command => {
            let token = auth
                .current_token()
                .await?
                .context("not logged in; run `board login` first")?;
            state.identity.verify(&token).await?;

            let board = OrderBoard::new(state.orders.clone());
            board.mount().await;
            run_board_command(&board, command).await?;
            print_columns(&board.columns().await);
        }
    }

    Ok(())
}

async fn run_board_command(board: &OrderBoard, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Show => {}
        Command::Create {
            description,
            products,
        } => {
            let mut form = board.open_create();
            form.set_description(description);
            fill_products(&mut form, products);
            board.submit(&mut form).await;
        }
        Command::Edit {
            id,
            description,
            products,
        } => {
            let mut form = board
                .edit(id)
                .await
                .with_context(|| format!("order {id} is not on the board"))?;
            if let Some(description) = description {
                form.set_description(description);
            }
            if !products.is_empty() {
                form.products.clear();
                fill_products(&mut form, products);
            }
            board.submit(&mut form).await;
        }
        Command::Move { id } => {
            let columns = board.columns().await;
            let card = OrderStatus::ALL
                .iter()
                .flat_map(|status| columns.column(*status))
                .find(|card| card.order.id == id)
                .with_context(|| format!("order {id} is not on the board"))?;
            board.advance(card).await;
        }
        Command::Delete { id } => board.delete(id).await,
        Command::Register { .. }
        | Command::Login { .. }
        | Command::Google
        | Command::Logout => {}
    }
    Ok(())
}

fn fill_products(form: &mut OrderForm, products: Vec<ProductLine>) {
    for line in products {
        form.add_product();
        let index = form.products.len() - 1;
        form.set_product_name(index, line.name);
        form.set_quantity(index, line.quantity);
    }
}

fn print_columns(columns: &BoardColumns) {
    for (title, status) in [
        ("Create", OrderStatus::Create),
        ("In Progress", OrderStatus::InProgress),
        ("Done", OrderStatus::Done),
    ] {
        println!("== {title}");
        for card in columns.column(status) {
            let order = &card.order;
            println!("  Order #{} ({})", card.number, order.id);
            println!("    Desc: {}", order.description);
            for line in &order.products {
                println!("    {} {} x {} UZS", line.name, line.quantity, line.price);
            }
            println!("    Total: {} UZS", order.total);
        }
    }
}
