use anyhow::Context;
use backend_api::{run_server, FileSalesRepository};
use std::sync::Arc;
use std::{
    env,
    path::{Path, PathBuf},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    logger::init("backend_api=debug,report_engine=info,data_import=debug,tower_http=debug");

    let settings_path = env::var("SETTINGS_PATH").ok().map(PathBuf::from);
    let settings = settings_loader::load_settings_with_fallback(settings_path.as_ref())
        .context("load service settings")?;
    let mut settings =
        settings_loader::apply_env_overrides(settings).context("apply env overrides")?;

    // Relative data paths resolve against the workspace root first, then the working directory.
    let crate_root = env::current_dir().context("read current directory")?;
    let workspace_root = find_workspace_root(&crate_root).unwrap_or_else(|| crate_root.clone());
    settings.data_path = resolve_with_fallback(&settings.data_path, &[&workspace_root, &crate_root]);

    tracing::info!(
        workspace_root = %workspace_root.display(),
        data_path = %settings.data_path.display(),
        host = %settings.host,
        port = settings.port,
        "Sales Report API Server"
    );

    if !settings.data_path.exists() {
        tracing::warn!(
            data_path = %settings.data_path.display(),
            "sales data not found; /api/sales-report will return 500 until the file exists. \
             Set SALES_DATA_PATH to override"
        );
    }

    let repo = Arc::new(FileSalesRepository::new(&settings.data_path));
    run_server(repo, &settings).await?;

    Ok(())
}

/// Find the Cargo workspace root by traversing up until a Cargo.toml that contains a [workspace] section.
fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    for _ in 0..10 {
        let candidate = dir.join("Cargo.toml");
        if let Ok(content) = std::fs::read_to_string(&candidate) {
            if content.contains("[workspace]") {
                return Some(dir);
            }
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Resolve a path against a list of base directories, returning the first existing match, or the path under the first base.
fn resolve_with_fallback(raw: &Path, bases: &[&PathBuf]) -> PathBuf {
    if raw.is_absolute() {
        return raw.to_path_buf();
    }
    for base in bases {
        let candidate = base.join(raw);
        if candidate.exists() {
            return candidate;
        }
    }
    match bases.first() {
        Some(base) => base.join(raw),
        None => raw.to_path_buf(),
    }
}
