use super::render::{render_form, render_schema};
use super::setup::{Cli, Commands};
use attrform::api::FormApi;
use attrform::config::{home_dir, AttrFormConfig};
use attrform::error::{AttrFormError, Result};
use attrform::schema::FsSchemaStore;
use attrform::source::fs::XattrSource;
use attrform::source::{dump, AttributeSource};
use attrform::template::TemplateRegistry;
use clap::Parser;
use colored::*;
use console::Term;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Log filter, in `EnvFilter` syntax.
pub const LOG_ENV: &str = "ATTRFORM_LOG";

struct AppContext {
    api: FormApi<FsSchemaStore>,
    config: AttrFormConfig,
    home: PathBuf,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::Show {
            path,
            dump,
            type_id,
            json,
        } => handle_show(&ctx, &path, dump, type_id.as_deref(), json),
        Commands::Schema { type_id, json } => handle_schema(&ctx, &type_id, json),
        Commands::Config => handle_config(&ctx),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let home = home_dir()?;
    let config = AttrFormConfig::load(&home)?;
    debug!(home = %home.display(), ?config, "loaded configuration");

    let templates = TemplateRegistry::new()
        .with_template_dir(config.template_dir(&home))
        .with_supertype_templates(config.supertype_templates);
    let schemas = FsSchemaStore::new(config.schema_dir(&home));
    let api = FormApi::new(schemas, templates).with_show_unlisted(config.show_unlisted);

    let use_color = !cli.no_color && Term::stdout().features().colors_supported();

    Ok(AppContext {
        api,
        config,
        home,
        use_color,
    })
}

fn open_source(ctx: &AppContext, path: &Path, from_dump: bool) -> Result<Box<dyn AttributeSource>> {
    if from_dump {
        return Ok(Box::new(dump::load(path)?));
    }
    let source = XattrSource::open(path)?.with_namespace(&ctx.config.xattr_namespace);
    Ok(Box::new(source))
}

fn handle_show(
    ctx: &AppContext,
    path: &Path,
    from_dump: bool,
    type_override: Option<&str>,
    json: bool,
) -> Result<()> {
    let source = open_source(ctx, path, from_dump)?;
    let result = ctx.api.build_form(source.as_ref(), type_override)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.form)?);
    } else {
        print!("{}", render_form(&result.form, ctx.use_color));
    }
    Ok(())
}

fn handle_schema(ctx: &AppContext, type_id: &str, json: bool) -> Result<()> {
    let entries = ctx.api.schema_for(type_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", render_schema(type_id, &entries, ctx.use_color));
    }
    Ok(())
}

fn handle_config(ctx: &AppContext) -> Result<()> {
    let config = &ctx.config;
    println!("home = {}", ctx.home.display());
    println!("show_unlisted = {}", config.show_unlisted);
    println!("supertype_templates = {}", config.supertype_templates);
    println!("xattr_namespace = {}", config.xattr_namespace);
    println!("schema_dir = {}", config.schema_dir(&ctx.home).display());
    println!("template_dir = {}", config.template_dir(&ctx.home).display());
    Ok(())
}

/// Prints the user-facing report for `err` on stderr.
pub fn print_error(err: &AttrFormError) {
    let report = err.report();
    eprintln!("{}", report.title.red().bold());
    eprintln!("{}", report.message);
    eprintln!("{}", format!("Detail: {}", report.cause).dimmed());
}
