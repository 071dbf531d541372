//! One-shot CLI commands.
//!
//! Each command drives the same state types the dashboard uses, so the
//! rules for stale results, local edits and error messages are shared. Output
//! goes to any `Write` so commands can be exercised against a mock server.

use std::io::{self, BufRead, Write};
use std::path::Path;

use color_eyre::eyre::{eyre, Result, WrapErr};

use crate::adapters::ReqwestHttpClient;
use crate::api::MochiClient;
use crate::auth::{CredentialsManager, RequestContext};
use crate::config::Config;
use crate::error::MochiError;
use crate::models::ChatbotRef;
use crate::state::{ChatController, ChatLogs, ChatbotDirectory, Settled, SettingsEditor};
use crate::traits::HttpClient;
use crate::widgets::WidgetTable;

use super::args::CliCommand;
use super::output::{self, icons};

/// Everything a command needs: the API client, the request context built
/// from stored credentials, and the credential store itself.
pub struct CliEnv<H: HttpClient = ReqwestHttpClient> {
    pub client: MochiClient<H>,
    pub ctx: RequestContext,
    pub credentials: CredentialsManager,
}

impl CliEnv<ReqwestHttpClient> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let credentials = CredentialsManager::new()?;
        let stored = credentials.load();
        let client = MochiClient::with_timeout(config.request_timeout())?;
        let ctx = RequestContext::new(&config.api_url).with_credentials(&stored);
        Ok(Self {
            client,
            ctx,
            credentials,
        })
    }
}

impl<H: HttpClient> CliEnv<H> {
    pub fn new(client: MochiClient<H>, ctx: RequestContext, credentials: CredentialsManager) -> Self {
        Self {
            client,
            ctx,
            credentials,
        }
    }
}

/// Run one command, prompting on the terminal for missing secrets.
pub async fn execute<H: HttpClient>(
    command: CliCommand,
    env: &CliEnv<H>,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        CliCommand::Login { username } => {
            let username = match username {
                Some(name) => name,
                None => prompt_line("Username: ")?,
            };
            let password = rpassword::prompt_password("Password: ")
                .wrap_err("failed to read password")?;
            login(env, &username, &password, out).await
        }
        CliCommand::Register { username, email } => {
            let password = rpassword::prompt_password("Password: ")
                .wrap_err("failed to read password")?;
            register(env, &username, &email, &password, out).await
        }
        other => run(other, env, out).await,
    }
}

/// Run a command that needs no interactive input.
pub async fn run<H: HttpClient>(
    command: CliCommand,
    env: &CliEnv<H>,
    out: &mut impl Write,
) -> Result<()> {
    let api = &env.client;
    let ctx = &env.ctx;
    match command {
        CliCommand::Logout => logout(env, out).await,
        CliCommand::List => {
            let mut directory = ChatbotDirectory::new();
            directory.refresh(api, ctx).await;
            fail_on(directory.error())?;
            write!(out, "{}", output::format_chatbots(directory.chatbots()))?;
            Ok(())
        }
        CliCommand::Types => {
            let types = api.chatbot_types(ctx).await.map_err(report)?;
            write!(out, "{}", output::format_types(&types))?;
            Ok(())
        }
        CliCommand::Create {
            name,
            chatbot_type,
            desc,
        } => {
            let mut directory = ChatbotDirectory::new();
            let new = crate::models::NewChatbot::new(name, chatbot_type).with_desc(desc);
            directory.create(api, ctx, &new).await;
            fail_on(directory.error())?;
            let created = directory
                .chatbots()
                .last()
                .map(|c| format!("Created chatbot {} ({})", c.name, c.id))
                .unwrap_or_else(|| "Created chatbot".to_string());
            writeln!(out, "{}", output::status_line(icons::SUCCESS, &created))?;
            Ok(())
        }
        CliCommand::Delete { id } => {
            let mut directory = ChatbotDirectory::new();
            directory.delete(api, ctx, &id).await;
            fail_on(directory.error())?;
            writeln!(
                out,
                "{}",
                output::status_line(icons::SUCCESS, &format!("Deleted chatbot {}", id))
            )?;
            Ok(())
        }
        CliCommand::Logs { id } => {
            let mut logs = ChatLogs::new();
            logs.load(api, ctx, &id).await;
            fail_on(logs.error())?;
            write!(out, "{}", output::header(&format!("LOGS · chatbot {}", id)))?;
            write!(out, "{}", output::format_logs(logs.threads()))?;
            Ok(())
        }
        CliCommand::Settings { id } => {
            let mut editor = SettingsEditor::new();
            editor.load(api, ctx, &id).await;
            fail_on(editor.error())?;
            write!(out, "{}", output::format_settings(editor.settings()))?;
            Ok(())
        }
        CliCommand::Set { id, key, value } => set_setting(env, &id, &key, &value, out).await,
        CliCommand::Unset { id, key } => {
            let mut editor = SettingsEditor::new();
            editor.load(api, ctx, &id).await;
            fail_on(editor.error())?;
            if !editor.settings().contains_key(&key) {
                return Err(eyre!("chatbot {} has no setting '{}'", id, key));
            }
            editor.delete_setting(api, ctx, &key).await;
            fail_on(editor.error())?;
            writeln!(
                out,
                "{}",
                output::status_line(icons::SUCCESS, &format!("Deleted setting {}", key))
            )?;
            Ok(())
        }
        CliCommand::Docs { id } => {
            let documents = api
                .get_documents(ctx, &id)
                .await
                .map_err(report)?;
            write!(out, "{}", output::format_documents(&documents))?;
            Ok(())
        }
        CliCommand::Upload { id, path } => {
            let path = Path::new(&path);
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| eyre!("'{}' is not a file path", path.display()))?
                .to_string();
            let contents = tokio::fs::read(path).await.map_err(report)?;
            api.upload_document(ctx, &id, &file_name, contents.into())
                .await
                .map_err(report)?;
            writeln!(
                out,
                "{}",
                output::status_line(icons::SUCCESS, &format!("Uploaded {}", file_name))
            )?;
            Ok(())
        }
        CliCommand::RemoveDocument { id, name } => {
            api.delete_document(ctx, &id, &name)
                .await
                .map_err(report)?;
            writeln!(
                out,
                "{}",
                output::status_line(icons::SUCCESS, &format!("Deleted document {}", name))
            )?;
            Ok(())
        }
        CliCommand::Chat { id, message } => chat_once(env, &id, &message, out).await,
        CliCommand::Login { .. } | CliCommand::Register { .. } => {
            Err(eyre!("this command needs a terminal to read the password"))
        }
        CliCommand::Version | CliCommand::Help | CliCommand::RunTui | CliCommand::Invalid(_) => {
            Err(eyre!("not an API command"))
        }
    }
}

pub async fn login<H: HttpClient>(
    env: &CliEnv<H>,
    username: &str,
    password: &str,
    out: &mut impl Write,
) -> Result<()> {
    let credentials = env
        .client
        .login(&env.ctx, username, password)
        .await
        .map_err(|e| match e {
            crate::error::ApiError::Unauthorized => eyre!("Wrong username or password."),
            other => report(other),
        })?;
    env.credentials.save(&credentials).map_err(report)?;
    let name = credentials.username.as_deref().unwrap_or(username);
    writeln!(
        out,
        "{}",
        output::status_line(icons::SUCCESS, &format!("Signed in as {}", name))
    )?;
    Ok(())
}

pub async fn register<H: HttpClient>(
    env: &CliEnv<H>,
    username: &str,
    email: &str,
    password: &str,
    out: &mut impl Write,
) -> Result<()> {
    env.client
        .register(&env.ctx, username, email, password)
        .await
        .map_err(report)?;
    writeln!(
        out,
        "{}",
        output::status_line(
            icons::SUCCESS,
            &format!("Registered {}. Run `mochi login {}` to sign in.", username, username)
        )
    )?;
    Ok(())
}

async fn logout<H: HttpClient>(env: &CliEnv<H>, out: &mut impl Write) -> Result<()> {
    if env.ctx.is_authenticated() {
        if let Err(err) = env.client.logout(&env.ctx).await {
            tracing::warn!("Server logout failed: {}", err);
            writeln!(
                out,
                "{}",
                output::status_line(icons::WARNING, "Server did not confirm logout")
            )?;
        }
    }
    env.credentials.clear().map_err(report)?;
    writeln!(out, "{}", output::status_line(icons::SUCCESS, "Signed out"))?;
    Ok(())
}

/// Load the chatbot's settings, parse `raw` with the setting's widget, then
/// save through the same path the dashboard uses.
async fn set_setting<H: HttpClient>(
    env: &CliEnv<H>,
    id: &str,
    key: &str,
    raw: &str,
    out: &mut impl Write,
) -> Result<()> {
    let mut editor = SettingsEditor::new();
    editor.load(&env.client, &env.ctx, id).await;
    fail_on(editor.error())?;

    let setting = editor
        .settings()
        .get(key)
        .ok_or_else(|| eyre!("chatbot {} has no setting '{}'", id, key))?;
    let value = WidgetTable::standard()
        .validate(setting, raw)
        .map_err(|reason| eyre!("invalid value for '{}': {}", key, reason))?;
    editor.set_local(key, value);

    match editor.save(&env.client, &env.ctx).await {
        Some(Settled::Applied) | None => {}
        Some(_) => fail_on(editor.error())?,
    }
    let saved = editor
        .settings()
        .get(key)
        .map(|s| s.value.to_string())
        .unwrap_or_default();
    writeln!(
        out,
        "{}",
        output::status_line(icons::SUCCESS, &format!("{} = {}", key, saved))
    )?;
    Ok(())
}

/// Open a fresh thread, send one message and print the reply.
async fn chat_once<H: HttpClient>(
    env: &CliEnv<H>,
    id: &str,
    message: &str,
    out: &mut impl Write,
) -> Result<()> {
    let mut chat = ChatController::new();
    let ticket = chat.select_chatbot(ChatbotRef {
        id: id.to_string(),
        name: id.to_string(),
        chatbot_type: String::new(),
    });
    if let Some(ticket) = ticket {
        let result = env.client.create_thread(&env.ctx, &ticket.chatbot_id).await;
        chat.complete_create_thread(ticket, result);
    }
    fail_on(chat.error())?;

    chat.set_input(message);
    chat.send(&env.client, &env.ctx).await;
    fail_on(chat.error())?;

    let reply = chat
        .session()
        .confirmed()
        .filter(|m| !m.is_user())
        .last()
        .ok_or_else(|| eyre!("the chatbot did not reply"))?;
    writeln!(out, "{}", reply.content)?;
    Ok(())
}

fn report(err: impl Into<MochiError>) -> color_eyre::Report {
    let err = err.into();
    tracing::debug!("CLI command failed [{}]: {}", err.error_code(), err);
    eyre!(err.user_message())
}

fn fail_on(error: Option<&str>) -> Result<()> {
    match error {
        Some(message) => Err(eyre!(message.to_string())),
        None => Ok(()),
    }
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let line = line.trim().to_string();
    if line.is_empty() {
        return Err(eyre!("a username is required"));
    }
    Ok(line)
}
