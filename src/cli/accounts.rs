// Account administration commands

use std::io::{self, Write};
use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::AccountCoordinator;
use crate::errors::InternalError;
use crate::types::internal::context::RequestContext;

pub async fn create_account(
    app_data: Arc<AppData>,
    first_name: &str,
    last_name: &str,
    password: &str,
) -> Result<(), InternalError> {
    let ctx = RequestContext::for_cli("create-account");
    let account = AccountCoordinator::new(app_data)
        .create_account(&ctx, first_name, last_name, password)
        .await?;

    println!("✅ Account created");
    println!("   Id:             {}", account.id);
    println!("   Account number: {}", account.account_number);
    println!("   Holder:         {} {}", account.first_name, account.last_name);

    Ok(())
}

pub async fn list_accounts(app_data: Arc<AppData>) -> Result<(), InternalError> {
    let accounts = AccountCoordinator::new(app_data).list_accounts().await?;

    if accounts.is_empty() {
        println!("ℹ️  No accounts.");
        return Ok(());
    }

    println!("{:>6}  {:>10}  {:>14}  {}", "ID", "NUMBER", "BALANCE", "HOLDER");
    for account in accounts {
        println!(
            "{:>6}  {:>10}  {:>14}  {} {}",
            account.id, account.account_number, account.balance, account.first_name, account.last_name
        );
    }

    Ok(())
}

pub async fn adjust_balance(app_data: Arc<AppData>, id: i64, delta: i64) -> Result<(), InternalError> {
    let ctx = RequestContext::for_cli("adjust-balance");
    let balance = AccountCoordinator::new(app_data)
        .adjust_balance(&ctx, id, delta)
        .await?;

    println!("✅ Account {} adjusted by {}. New balance: {}", id, delta, balance);

    Ok(())
}

pub async fn delete_account(
    app_data: Arc<AppData>,
    id: i64,
    skip_confirmation: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("delete-account");
    let account = app_data.account_store.get_by_id(id).await?;

    if !skip_confirmation {
        println!("⚠️  WARNING: You are about to permanently delete an account.");
        println!(
            "   Account: {} {} (number {}, balance {})",
            account.first_name, account.last_name, account.account_number, account.balance
        );
        print!("   Are you sure? (yes/no): ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if input.trim().to_lowercase() != "yes" {
            println!("❌ Deletion cancelled.");
            return Ok(());
        }
    }

    AccountCoordinator::new(app_data)
        .delete_account(&ctx, account.id)
        .await?;

    println!("✅ Account {} deleted.", id);

    Ok(())
}
