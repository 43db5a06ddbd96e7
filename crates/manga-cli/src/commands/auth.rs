use serde::Serialize;

use manga_auth::NavAffordances;
use manga_core::messages::LOGOUT_DONE;
use manga_core::{Page, Redirect, User};
use manga_views::auth_forms::redirect_if_logged_in;
use manga_views::{LoginForm, RegisterForm};

use crate::cli::subcommands::AuthCommands;
use crate::cli::subcommands::auth::{AuthLoginArgs, AuthRegisterArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthResponse {
    authenticated: bool,
    user: Option<User>,
    next: Option<String>,
}

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    admin: bool,
    user: Option<User>,
    nav: NavAffordances,
}

/// Handle `mangactl auth <subcommand>`.
pub async fn handle(action: &AuthCommands, ctx: &mut AppContext) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login(args, ctx).await,
        AuthCommands::Register(args) => register(args, ctx).await,
        AuthCommands::Logout => logout(ctx),
        AuthCommands::Status => status(ctx).await,
    }
}

async fn login(args: &AuthLoginArgs, ctx: &mut AppContext) -> anyhow::Result<()> {
    let mut api = ctx.api(Page::Login)?;
    if let Some(redirect) =
        redirect_if_logged_in(api.auth_mut(), &ctx.config.ui, &mut ctx.notes).await
    {
        return respond(ctx, api.auth().user().cloned(), Some(redirect));
    }
    let mut form = LoginForm::new(args.username.as_str(), args.password.as_str());
    let redirect = form
        .submit(api.auth_mut(), &ctx.config.ui, &mut ctx.notes)
        .await;
    ctx.ensure_no_error()?;
    respond(ctx, api.auth().user().cloned(), redirect)
}

async fn register(args: &AuthRegisterArgs, ctx: &mut AppContext) -> anyhow::Result<()> {
    let mut api = ctx.api(Page::Register)?;
    if let Some(redirect) =
        redirect_if_logged_in(api.auth_mut(), &ctx.config.ui, &mut ctx.notes).await
    {
        return respond(ctx, api.auth().user().cloned(), Some(redirect));
    }
    let mut form = RegisterForm {
        name: args.name.clone(),
        username: args.username.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
        confirm_password: args
            .confirm_password
            .clone()
            .unwrap_or_else(|| args.password.clone()),
    };
    let redirect = form
        .submit(api.auth_mut(), &ctx.config.ui, &mut ctx.notes)
        .await;
    ctx.ensure_no_error()?;
    respond(ctx, api.auth().user().cloned(), redirect)
}

fn respond(ctx: &AppContext, user: Option<User>, redirect: Option<Redirect>) -> anyhow::Result<()> {
    output(
        &AuthResponse {
            authenticated: user.is_some(),
            user,
            next: redirect.map(|r| r.to.path()),
        },
        ctx.flags.format,
    )
}

fn logout(ctx: &mut AppContext) -> anyhow::Result<()> {
    let mut api = ctx.api(Page::Home)?;
    let redirect = api.auth_mut().logout();
    ctx.notes.success(LOGOUT_DONE);
    ctx.report_redirect(redirect);
    output(
        &AuthResponse {
            authenticated: false,
            user: None,
            next: None,
        },
        ctx.flags.format,
    )
}

async fn status(ctx: &mut AppContext) -> anyhow::Result<()> {
    let mut api = ctx.api(Page::Home)?;
    let verification = api.auth_mut().verify_token().await;
    ctx.report_redirect(verification.redirect());
    let authenticated = verification.is_verified();
    let auth = api.auth();
    output(
        &AuthStatusResponse {
            authenticated,
            admin: auth.is_admin(),
            user: auth.user().cloned(),
            nav: auth.nav().clone(),
        },
        ctx.flags.format,
    )
}
