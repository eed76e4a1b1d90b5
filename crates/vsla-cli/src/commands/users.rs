use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{format_timestamp_datetime, now_utc, parse_user_id};
use anyhow::Result;
use vsla_core::domain::{normalize_phone, User};
use vsla_store::repo::UserNew;

use clap::Args;

#[derive(Debug, Args)]
pub struct AddUserArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub alt_phone: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    pub phone: String,
}

pub fn add_user(ctx: &Context<'_>, args: AddUserArgs) -> Result<()> {
    let user = ctx.store.users().create(
        now_utc(),
        UserNew {
            name: args.name,
            username: args.username,
            phone_number: args.phone,
            alt_phone_number: args.alt_phone,
        },
        &ctx.config.default_country_code,
    )?;

    if ctx.json {
        print_json(&user)?;
    } else {
        println!("added user {} ({})", user.name, user.id);
    }
    Ok(())
}

pub fn show_user(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let id = parse_user_id(&args.id)?;
    let user = ctx
        .store
        .users()
        .get(id)?
        .ok_or_else(|| not_found(format!("user {id}")))?;

    if ctx.json {
        print_json(&user)?;
    } else {
        print_user(ctx, &user);
    }
    Ok(())
}

pub fn list_users(ctx: &Context<'_>, _args: ListArgs) -> Result<()> {
    let users = ctx.store.users().list_all()?;

    if ctx.json {
        print_json(&users)?;
    } else if users.is_empty() {
        println!("no users");
    } else {
        for user in &users {
            println!(
                "{}  {}  {}",
                user.id,
                user.name,
                user.phone_number.as_deref().unwrap_or("-")
            );
        }
    }
    Ok(())
}

pub fn delete_user(ctx: &Context<'_>, args: DeleteArgs) -> Result<()> {
    let id = parse_user_id(&args.id)?;
    ctx.store.users().delete(id)?;
    if !ctx.json {
        println!("deleted user {id}");
    }
    Ok(())
}

pub fn lookup_user(ctx: &Context<'_>, args: LookupArgs) -> Result<()> {
    // The store-level suffix match degenerates to a wildcard on empty
    // input, so reject it here before it reaches the query.
    let raw = args.phone.trim();
    if raw.is_empty() {
        return Err(invalid_input("phone number is required"));
    }

    let user = ctx
        .store
        .users()
        .find_by_phone(raw, &ctx.config.default_country_code)?
        .ok_or_else(|| not_found(format!("no user matches {raw}")))?;

    if ctx.json {
        print_json(&user)?;
    } else {
        print_user(ctx, &user);
    }
    Ok(())
}

fn print_user(ctx: &Context<'_>, user: &User) {
    println!("id:         {}", user.id);
    println!("name:       {}", user.name);
    println!("username:   {}", user.username.as_deref().unwrap_or("-"));
    println!(
        "phone:      {}",
        user.phone_number.as_deref().unwrap_or("-")
    );
    println!(
        "alt phone:  {}",
        user.alt_phone_number.as_deref().unwrap_or("-")
    );
    if let Some(phone) = user.phone_number.as_deref() {
        if let Some(canonical) = normalize_phone(phone, &ctx.config.default_country_code) {
            println!("canonical:  {canonical}");
        }
    }
    println!("created:    {}", format_timestamp_datetime(user.created_at));
    println!("updated:    {}", format_timestamp_datetime(user.updated_at));
}
