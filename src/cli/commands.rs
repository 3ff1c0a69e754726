//! Subcommand implementations. Each resource command drives the same
//! [`CrudController`] a list screen would.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cli::output;
use crate::cli::{Cli, Commands, ResourceKind, SortArg};
use crate::core::config::Config;
use crate::core::http::ApiClient;
use crate::features::auth::{AuthContext, AuthService, FileTokenStore, LoginRequestDto};
use crate::features::brands::BrandResource;
use crate::features::crud::{CrudController, CrudService, ListFilters, Resource, ResourceApi};
use crate::features::islands::IslandResource;
use crate::features::iups::IupResource;
use crate::features::products::ProductResource;
use crate::features::quotations::{QuotationPrinter, QuotationResource};
use crate::features::term_conditions::TermConditionResource;
use crate::features::territory::models::{
    AreaResource, GroupResource, IupSegmentationResource, IupZoneResource,
};
use crate::features::territory::tree::{self, ExpandedSet, NodeKey, TerritoryNode};
use crate::features::territory::{TerritoryService, TerritoryTreeQuery};
use crate::features::tracking::{TrackingQuery, TrackingService};
use crate::shared::types::SortOrder;

/// Runs `$call::<R>(args...)` with `R` bound to the resource type of `$kind`
macro_rules! with_resource {
    ($kind:expr, $call:ident($($arg:expr),* $(,)?)) => {
        match $kind {
            ResourceKind::Island => $call::<IslandResource>($($arg),*).await,
            ResourceKind::Brand => $call::<BrandResource>($($arg),*).await,
            ResourceKind::Iup => $call::<IupResource>($($arg),*).await,
            ResourceKind::Group => $call::<GroupResource>($($arg),*).await,
            ResourceKind::Area => $call::<AreaResource>($($arg),*).await,
            ResourceKind::IupZone => $call::<IupZoneResource>($($arg),*).await,
            ResourceKind::IupSegmentation => $call::<IupSegmentationResource>($($arg),*).await,
            ResourceKind::Quotation => $call::<QuotationResource>($($arg),*).await,
            ResourceKind::Product => $call::<ProductResource>($($arg),*).await,
            ResourceKind::TermCondition => $call::<TermConditionResource>($($arg),*).await,
        }
    };
}

/// Shared handles for one CLI invocation
pub struct Session {
    pub config: Config,
    pub client: Arc<ApiClient>,
    pub json: bool,
}

impl Session {
    pub fn new(config: Config, json: bool) -> anyhow::Result<Self> {
        let store = Arc::new(FileTokenStore::new(&config.auth.token_dir));
        let auth = Arc::new(AuthContext::load(store)?);
        let client = Arc::new(ApiClient::new(&config.api, auth)?);
        Ok(Self {
            config,
            client,
            json,
        })
    }

    fn controller<R: Resource>(&self) -> CrudController<R> {
        let service: Arc<dyn ResourceApi<R>> =
            Arc::new(CrudService::<R>::new(Arc::clone(&self.client)));
        CrudController::new(service, &self.config.list)
    }

    fn page_size(&self, limit: Option<i64>) -> i64 {
        limit.unwrap_or(self.config.list.default_page_size)
    }
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let session = Session::new(config, cli.json)?;

    match cli.command {
        Commands::Login { email, password } => login(&session, email, password).await,
        Commands::Logout => {
            AuthService::new(Arc::clone(&session.client)).logout().await?;
            println!("Logged out.");
            Ok(())
        }
        Commands::List {
            resource,
            page,
            limit,
            search,
            sort,
            filters,
        } => {
            let mut list_filters = ListFilters::default();
            if let Some(search) = search {
                list_filters.set("search", Value::String(search));
            }
            if let Some(sort) = sort {
                list_filters.sort_order = match sort {
                    SortArg::Asc => SortOrder::Asc,
                    SortArg::Desc => SortOrder::Desc,
                };
            }
            for (key, value) in filters {
                list_filters.set(&key, Value::String(value));
            }
            let limit = session.page_size(limit);
            with_resource!(resource, list(&session, resource, list_filters, page, limit))
        }
        Commands::Get { resource, id } => with_resource!(resource, show(&session, &id)),
        Commands::Create {
            resource,
            json_body,
            file,
        } => {
            let body = read_body(json_body, file)?;
            with_resource!(resource, create(&session, &body))
        }
        Commands::Update {
            resource,
            id,
            json_body,
            file,
        } => {
            let body = read_body(json_body, file)?;
            with_resource!(resource, update(&session, &id, &body))
        }
        Commands::Delete { resource, id } => with_resource!(resource, delete(&session, &id)),
        Commands::Territory {
            island_id,
            search,
            expand,
            expand_all,
        } => {
            let query = TerritoryTreeQuery { search, island_id };
            territory(&session, query, &expand, expand_all).await
        }
        Commands::QuotationPdf { id, out } => quotation_pdf(&session, &id, out).await,
        Commands::Track { user_id, date } => track(&session, TrackingQuery { user_id, date }).await,
    }
}

async fn login(session: &Session, email: String, password: Option<String>) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p,
        None => {
            eprint!("Password: ");
            let mut line = String::new();
            std::io::stdin()
                .lock()
                .read_line(&mut line)
                .context("Failed to read password from stdin")?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let dto = LoginRequestDto { email, password };
    let user = AuthService::new(Arc::clone(&session.client)).login(&dto).await?;
    match user.and_then(|u| u.name) {
        Some(name) => println!("Logged in as {}.", name),
        None => println!("Logged in."),
    }
    Ok(())
}

fn read_body(json_body: Option<String>, file: Option<String>) -> anyhow::Result<String> {
    match (json_body, file) {
        (Some(body), _) => Ok(body),
        (None, Some(path)) => {
            std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))
        }
        (None, None) => anyhow::bail!("Provide a body with --json or --file"),
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> anyhow::Result<T> {
    serde_json::from_str(body).map_err(|e| anyhow::anyhow!("Invalid JSON: {}", e))
}

async fn print_page<R: Resource>(
    session: &Session,
    kind: ResourceKind,
    controller: &CrudController<R>,
) -> anyhow::Result<()> {
    let state = controller.snapshot().await;
    if session.json {
        println!("{}", serde_json::to_string_pretty(&state.items)?);
        return Ok(());
    }

    let rows: Vec<Value> = state
        .items
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()?;
    let (id_field, name_field) = kind.key_fields();
    println!("{}", output::render_items(&rows, id_field, name_field));
    println!("{}", output::render_pagination(&state.pagination));
    Ok(())
}

async fn list<R: Resource>(
    session: &Session,
    kind: ResourceKind,
    filters: ListFilters,
    page: i64,
    limit: i64,
) -> anyhow::Result<()> {
    let controller = session.controller::<R>();
    controller.set_filters(filters).await;
    controller.fetch(page, limit).await?;
    print_page(session, kind, &controller).await
}

async fn show<R: Resource>(session: &Session, id: &str) -> anyhow::Result<()> {
    let item = session.controller::<R>().get(id).await?;
    println!("{}", serde_json::to_string_pretty(&item)?);
    Ok(())
}

/// The first page is loaded before creating so the duplicate-name check has
/// rows to compare against
async fn create<R: Resource>(session: &Session, body: &str) -> anyhow::Result<()> {
    let dto: R::Create = parse_body(body)?;
    let controller = session.controller::<R>();
    controller.fetch(1, session.page_size(None)).await?;
    controller.create(dto).await?;
    println!("{} created.", R::LABEL);
    Ok(())
}

async fn update<R: Resource>(session: &Session, id: &str, body: &str) -> anyhow::Result<()> {
    let dto: R::Update = parse_body(body)?;
    let controller = session.controller::<R>();
    controller.fetch(1, session.page_size(None)).await?;
    controller.update(id, dto).await?;
    println!("{} {} updated.", R::LABEL, id);
    Ok(())
}

async fn delete<R: Resource>(session: &Session, id: &str) -> anyhow::Result<()> {
    let controller = session.controller::<R>();
    controller.delete(id).await?;
    println!("{} {} deleted.", R::LABEL, id);
    Ok(())
}

async fn territory(
    session: &Session,
    query: TerritoryTreeQuery,
    expand: &[String],
    expand_all: bool,
) -> anyhow::Result<()> {
    let nodes = TerritoryService::new(Arc::clone(&session.client))
        .fetch_tree(&query)
        .await?;

    let expanded = if expand_all {
        ExpandedSet::expand_all(&nodes)
    } else {
        expanded_from_args(&nodes, expand)?
    };

    let rows = tree::flatten(&nodes);
    let visible = tree::visible_rows(&rows, &expanded);
    if session.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else {
        println!("{}", output::render_tree(&visible, &expanded));
        println!("{} of {} nodes shown", visible.len(), rows.len());
    }
    Ok(())
}

/// Each `--expand` key opens the path down to it; unknown keys are skipped
fn expanded_from_args(nodes: &[TerritoryNode], expand: &[String]) -> anyhow::Result<ExpandedSet> {
    let mut expanded = ExpandedSet::new();
    for raw in expand {
        let key = raw.parse::<NodeKey>().map_err(anyhow::Error::msg)?;
        if tree::find_node(nodes, &key).is_none() {
            tracing::warn!("Territory node {} not found, ignoring", key);
            continue;
        }
        expanded = expanded.reveal(nodes, key);
    }
    Ok(expanded)
}

async fn quotation_pdf(session: &Session, id: &str, out: Option<String>) -> anyhow::Result<()> {
    let mut pdf_config = session.config.pdf.clone();
    if let Some(dir) = out {
        pdf_config.output_dir = PathBuf::from(dir);
    }

    let path = QuotationPrinter::new(Arc::clone(&session.client), &pdf_config)
        .print(id)
        .await?;
    println!("Saved {}", path.display());
    Ok(())
}

async fn track(session: &Session, query: TrackingQuery) -> anyhow::Result<()> {
    let service = TrackingService::new(&session.client, &session.config.api.track_base_url);
    let (points, summary) = service.route(&query).await?;

    if session.json {
        let body = serde_json::json!({"points": points, "summary": summary});
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", output::render_route(&points, &summary));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, children: Vec<TerritoryNode>) -> TerritoryNode {
        TerritoryNode {
            id: id.to_string(),
            name: format!("Node {}", id),
            code: None,
            status: None,
            children,
        }
    }

    #[test]
    fn test_expand_argument_opens_ancestors() {
        let nodes = vec![node("1", vec![node("12", vec![node("a1", vec![])])])];
        let expanded = expanded_from_args(&nodes, &["group:12".to_string()]).unwrap();

        let rows = tree::flatten(&nodes);
        let visible = tree::visible_rows(&rows, &expanded);
        assert_eq!(visible.len(), 3);
        assert!(expanded.contains(&"island:1".parse().unwrap()));
    }

    #[test]
    fn test_expand_argument_skips_unknown_and_rejects_malformed() {
        let nodes = vec![node("1", vec![])];
        let expanded = expanded_from_args(&nodes, &["area:404".to_string()]).unwrap();
        assert!(expanded.is_empty());

        assert!(expanded_from_args(&nodes, &["nonsense".to_string()]).is_err());
    }
}
