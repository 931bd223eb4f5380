//! Command execution
//!
//! List commands run through the same screens a UI would: the page is
//! mounted, filters are applied, then a page change triggers the fetch.
//! Failures routed to the screen's error handler land on a status line,
//! which is turned into the command's error.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use cadence_client::resources::{
    CadenceUpdate, CadencesApi, CallsApi, MailingsApi, NewCall, NewMailing, UsersApi,
};
use cadence_client::{ApiClient, ClientConfig, ErrorHandler, ListResource};
use cadence_core::{PageChange, StepStatus};
use cadence_ui::pages::{CadenceSettingsPage, ContactsPage, ListPage, SubmitOutcome};
use cadence_ui::{
    CadenceContext, CallRow, ContactRow, FilterConfig, MailingRow, StatusContext, StatusNotifier,
};
use colored::Colorize;

use crate::args::{
    CadencesCommand, Cli, Command, ContactsCommand, CreateArgs, ListArgs, MessageCommand,
    PageArgs, SearchArgs, UsersCommand,
};
use crate::output;

/// Which message resource a `calls` / `mailings` command targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Messages {
    Calls,
    Mailings,
}

/// Run a parsed command line, printing to stdout
pub async fn run(cli: Cli) -> Result<()> {
    // Offline preview; needs neither config nor network
    if let Command::Contacts {
        action: ContactsCommand::Actions { status },
    } = &cli.command
    {
        print!("{}", preview_actions(status));
        return Ok(());
    }

    let config = resolve_config(&cli)?;
    let client = ApiClient::from_config(&config)?;
    let session = Session::new(client, config.page_size);

    let out = match cli.command {
        Command::Calls { action } => session.messages(Messages::Calls, action).await?,
        Command::Mailings { action } => session.messages(Messages::Mailings, action).await?,
        Command::Contacts { action } => session.contacts(action).await?,
        Command::Cadences { action } => session.cadences(action).await?,
        Command::Users {
            action: UsersCommand::List,
        } => session.users().await?,
    };
    print!("{out}");
    Ok(())
}

/// Config file (or defaults) overridden by flags and environment
pub fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(token) = &cli.token {
        config = config.with_token(token);
    }
    config.validate().context("invalid client configuration")?;
    tracing::debug!(base_url = %config.base_url, page_size = config.page_size, "resolved config");
    Ok(config)
}

pub fn preview_actions(status: &StepStatus) -> String {
    let row = ContactRow {
        step_id: String::new(),
        name: String::new(),
        status: status.clone(),
        tone: cadence_ui::BadgeTone::for_status(status),
        step_label: None,
        lead_status: None,
        headline: None,
        owner: None,
    };
    format!("Actions for '{status}':\n{}", output::render_menu(&row.menu()))
}

struct Session {
    client: ApiClient,
    page_size: u32,
    status: StatusContext,
}

impl Session {
    fn new(client: ApiClient, page_size: u32) -> Self {
        Self {
            client,
            page_size,
            status: StatusContext::default(),
        }
    }

    fn errors(&self) -> Arc<dyn ErrorHandler> {
        Arc::new(StatusNotifier::new(self.status.clone()))
    }

    /// Turn a failure posted to the status line into an error
    fn check(&self) -> Result<()> {
        match self.status.current() {
            Some(message) => Err(anyhow!(message.text)),
            None => Ok(()),
        }
    }

    async fn messages(&self, kind: Messages, command: MessageCommand) -> Result<String> {
        match command {
            MessageCommand::List(args) => match kind {
                Messages::Calls => {
                    let page = cadence_ui::pages::calls_page(
                        self.client.clone(),
                        args.filters.scope(),
                        self.size(&args.page),
                        self.errors(),
                    );
                    self.list_page(&page, &args, |item| output::call_line(&CallRow::new(item)))
                        .await
                }
                Messages::Mailings => {
                    let page = cadence_ui::pages::emails_page(
                        self.client.clone(),
                        args.filters.scope(),
                        self.size(&args.page),
                        self.errors(),
                    );
                    self.list_page(&page, &args, |item| {
                        output::mailing_line(&MailingRow::new(item))
                    })
                    .await
                }
            },
            MessageCommand::Count(filters) => {
                let request = filters.count_request();
                let count = match kind {
                    Messages::Calls => CallsApi::new(self.client.clone()).total_count(request).await,
                    Messages::Mailings => {
                        MailingsApi::new(self.client.clone()).total_count(request).await
                    }
                }?;
                Ok(format!("{}\n", count.data.count))
            }
            MessageCommand::Stats => {
                let stats = match kind {
                    Messages::Calls => CallsApi::new(self.client.clone()).statistics().await,
                    Messages::Mailings => MailingsApi::new(self.client.clone()).statistics().await,
                }?;
                Ok(output::render_statistics(&stats.data))
            }
            MessageCommand::Send { id } => {
                let sent = match kind {
                    Messages::Calls => CallsApi::new(self.client.clone()).send(&id).await,
                    Messages::Mailings => MailingsApi::new(self.client.clone()).send(&id).await,
                };
                sent?;
                Ok(format!("{} {id}\n", "Sent".green()))
            }
            MessageCommand::Create(args) => {
                let created = match kind {
                    Messages::Calls => {
                        CallsApi::new(self.client.clone())
                            .create(&new_call(args))
                            .await
                    }
                    Messages::Mailings => {
                        MailingsApi::new(self.client.clone())
                            .create(&new_mailing(args))
                            .await
                    }
                }?;
                Ok(format!("{} {}\n", "Created".green(), created.data.id))
            }
        }
    }

    async fn contacts(&self, command: ContactsCommand) -> Result<String> {
        match command {
            ContactsCommand::List {
                cadence,
                page,
                filters,
            } => {
                let contacts =
                    ContactsPage::new(self.client.clone(), &cadence, self.size(&page), self.errors());
                let list = contacts.list();
                list.set_filter(filter_config(&filters)).await;
                list.mount();
                list.change_page(PageChange::new(self.size(&page), page.page))
                    .await;
                self.check()?;

                let snapshot = list.snapshot();
                let lines = contacts.rows().iter().map(output::contact_line).collect();
                Ok(output::render_list(
                    lines,
                    snapshot.empty_message,
                    &snapshot.pagination,
                ))
            }
            ContactsCommand::Actions { status } => Ok(preview_actions(&status)),
            ContactsCommand::SetStatus { step_id, status } => {
                let contacts = ContactsPage::new(self.client.clone(), "", self.page_size, self.errors());
                if !contacts.update_step(&step_id, status.clone()).await {
                    self.check()?;
                    bail!("could not move {step_id} to '{status}'");
                }
                Ok(format!("{} {step_id} → {status}\n", "Updated".green()))
            }
            ContactsCommand::Remove { step_id } => {
                let contacts = ContactsPage::new(self.client.clone(), "", self.page_size, self.errors());
                if !contacts.remove_step(&step_id).await {
                    self.check()?;
                    bail!("could not remove {step_id}");
                }
                Ok(format!("{} {step_id}\n", "Removed".green()))
            }
        }
    }

    async fn cadences(&self, command: CadencesCommand) -> Result<String> {
        let api = CadencesApi::new(self.client.clone());
        match command {
            CadencesCommand::Show { id } => {
                let cadence = api.get(&id).await?;
                Ok(output::render_cadence(&cadence.data))
            }
            CadencesCommand::Update { id, name, owner } => {
                let current = api.get(&id).await?.data;
                let context = CadenceContext::new(Some(current));
                let settings =
                    CadenceSettingsPage::new(self.client.clone(), context, self.errors());

                let mut values: CadenceUpdate = settings.initial_values();
                if let Some(name) = name {
                    values.name = name;
                }
                if let Some(owner) = owner {
                    values.owner_id = owner;
                }

                match settings.submit(values).await {
                    SubmitOutcome::Saved(cadence) => Ok(output::render_cadence(&cadence)),
                    SubmitOutcome::Invalid(errors) => {
                        let messages: Vec<String> =
                            errors.into_iter().map(|e| e.message).collect();
                        bail!(messages.join("; "))
                    }
                    SubmitOutcome::Failed => {
                        self.check()?;
                        bail!("cadence {id} was not updated")
                    }
                }
            }
        }
    }

    async fn users(&self) -> Result<String> {
        let users = UsersApi::new(self.client.clone()).list().await?;
        Ok(output::render_users(&users.data))
    }

    async fn list_page<S: ListResource>(
        &self,
        page: &ListPage<S>,
        args: &ListArgs,
        line: impl Fn(&S::Item) -> String,
    ) -> Result<String> {
        page.set_filter(filter_config(&args.filters.search)).await;
        page.mount();
        page.change_page(PageChange::new(self.size(&args.page), args.page.page))
            .await;
        self.check()?;

        let snapshot = page.snapshot();
        let lines = snapshot.items.iter().map(line).collect();
        Ok(output::render_list(
            lines,
            snapshot.empty_message,
            &snapshot.pagination,
        ))
    }

    fn size(&self, page: &PageArgs) -> u32 {
        page.page_size.unwrap_or(self.page_size)
    }
}

fn filter_config(search: &SearchArgs) -> FilterConfig {
    FilterConfig {
        is_open: false,
        search: search.search.clone().unwrap_or_default(),
        from_user: search.user_filter(),
        params: search.query_params(),
    }
}

fn new_call(args: CreateArgs) -> NewCall {
    NewCall {
        lead_id: args.lead,
        owner_id: args.owner,
        from_email: args.from,
        to_email: args.to,
        subject: args.subject,
        body_text: args.body,
        body_html: args.html,
        schedule_at: args.schedule_at,
        template_id: args.template,
        call_status: args.status,
    }
}

fn new_mailing(args: CreateArgs) -> NewMailing {
    NewMailing {
        lead_id: args.lead,
        owner_id: args.owner,
        from_email: args.from,
        to_email: args.to,
        subject: args.subject,
        body_text: args.body,
        body_html: args.html,
        schedule_at: args.schedule_at,
        template_id: args.template,
        mailing_status: args.status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_client::Method;
    use cadence_client::testing::StubTransport;
    use clap::Parser;
    use serde_json::json;

    fn session(stub: &Arc<StubTransport>) -> Session {
        Session::new(ApiClient::from_shared(stub.clone()), 10)
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cadence-desk").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_preview_actions() {
        let text = preview_actions(&StepStatus::Active);
        assert!(text.contains("Pause sequence now"));
        assert!(!text.contains("Resume sequence now"));
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = resolve_config(&cli(&["users", "list", "--base-url", "https://desk.test"])).unwrap();
        assert_eq!(config.base_url, "https://desk.test");
        assert_eq!(config.page_size, 10);

        assert!(resolve_config(&cli(&["users", "list", "--base-url", "desk.test"])).is_err());
    }

    #[tokio::test]
    async fn test_mailings_list_fetches_requested_page() {
        colored::control::set_override(false);
        let stub = Arc::new(StubTransport::new());
        stub.respond(Method::Get, "/api/mailings", 200, json!([]));
        stub.respond(
            Method::Get,
            "/api/mailings/statistics/total-count",
            200,
            json!({"count": 0}),
        );
        let Command::Mailings { action } = cli(&["mailings", "list", "--page", "3"]).command else {
            panic!("expected mailings");
        };

        let out = session(&stub).messages(Messages::Mailings, action).await.unwrap();

        assert!(out.starts_with("No mailings\n"));
        let rows = stub.requests_to("/api/mailings");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].path, "/api/mailings?offset=20&limit=10");
    }

    #[tokio::test]
    async fn test_list_failure_becomes_error() {
        let stub = Arc::new(StubTransport::new());
        stub.respond(Method::Get, "/api/calls", 500, json!({"message": "boom"}));
        stub.respond(
            Method::Get,
            "/api/calls/statistics/total-count",
            200,
            json!({"count": 3}),
        );
        let Command::Calls { action } = cli(&["calls", "list"]).command else {
            panic!("expected calls");
        };
        let err = session(&stub)
            .messages(Messages::Calls, action)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_set_status_reports_rejection() {
        let stub = Arc::new(StubTransport::new());
        stub.respond(Method::Post, "/api/contacts/pause/s1", 409, json!({}));
        let Command::Contacts { action } = cli(&["contacts", "set-status", "s1", "paused"]).command
        else {
            panic!("expected contacts");
        };
        let err = session(&stub).contacts(action).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to pause contacts s1 (status 409)");
    }
}
