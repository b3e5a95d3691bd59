use std::sync::Arc;

use order_board_api::{
    config::AppConfig,
    models::ProductName,
    services::auth_service::{AuthError, AuthFlow},
    session::MemoryTokenStorage,
    state::AppState,
    views::{auth::RegisterForm, order_form::OrderForm},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    if config.database_url.is_none() {
        anyhow::bail!("DATABASE_URL must be set to seed the database");
    }
    let state = AppState::from_config(&config).await?;

    let flow = AuthFlow::new(
        state.identity.clone(),
        state.store.clone(),
        Arc::new(MemoryTokenStorage::new()),
    );
    let demo = RegisterForm::new("Demo", "demo@example.com", "demo123");
    match flow.register(&demo).await {
        Ok(_) => println!("Created account {}", demo.email),
        Err(AuthError::Provider(message)) => println!("Skipped account {}: {message}", demo.email),
        Err(err) => return Err(err.into()),
    }

    if state.orders.list_all().await?.is_empty() {
        let mut form = OrderForm::new();
        form.set_description("Fruit basket");
        form.add_product();
        form.set_product_name(0, ProductName::Olma);
        form.set_quantity(0, 2);
        form.add_product();
        form.set_product_name(1, ProductName::Anor);
        form.submit(&state.orders).await?;
        println!("Seeded demo order");
    }

    println!("Seed completed");
    Ok(())
}
