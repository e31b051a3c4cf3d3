use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use docoutline::cli::{CliArgs, RunConfig, RunMode};
use docoutline::config::OutlineConfig;
use docoutline::config_paths;
use docoutline::fs_watcher::FileWatcher;
use docoutline::messages::Msg;
use docoutline::model::{Document, OutlineModel};
use docoutline::symbols::{JsonSymbols, SymbolSource, TreeSitterSymbols};
use docoutline::view::{
    instructions_text, nodes_at_line_json, nodes_at_line_text, outline_json, tree_text, TreeStyle,
};

mod runtime;

use runtime::app::FETCH_TIMEOUT;
use runtime::App;

/// Tree text for the current generation
fn render_tree(model: &OutlineModel, show_expansion: bool, show_kinds: bool) -> String {
    let Some(generation) = model.current.as_ref() else {
        return String::new();
    };
    let style = TreeStyle {
        expansion: show_expansion.then_some(&generation.expansion),
        show_tooltips: model.config.show_tooltips,
        show_kinds,
        highlighted: model.highlighted.filter(|_| show_expansion),
    };
    tree_text(generation.tree(), &style)
}

fn symbol_source(run: &RunConfig, document: &Document) -> Arc<dyn SymbolSource> {
    match &run.symbols {
        Some(path) => Arc::new(JsonSymbols::new(path.clone())),
        None => {
            if !document.language.has_symbols() {
                tracing::warn!(
                    "No grammar for {}; the outline will be empty (use --symbols to supply one)",
                    document.display_name()
                );
            }
            Arc::new(TreeSitterSymbols::new())
        }
    }
}

fn show(app: &App, run: &RunConfig, json: bool) -> Result<()> {
    if json {
        let tree = app.model().tree().context("no outline was produced")?;
        println!("{}", outline_json(tree)?);
    } else {
        let text = render_tree(app.model(), run.show_expansion, run.show_kinds);
        if !text.is_empty() {
            println!("{}", text);
        }
    }
    Ok(())
}

fn at(app: &App, line: usize, json: bool) -> Result<()> {
    let index = app.model().index().context("no outline was produced")?;
    if json {
        println!("{}", nodes_at_line_json(index, line)?);
    } else {
        println!("{}", nodes_at_line_text(index, line));
    }
    Ok(())
}

fn focus(app: &mut App, line: usize) -> Result<()> {
    let index = app.model().index().context("no outline was produced")?;
    let Some(target) = index.node_at_or_before(line) else {
        println!("no outline node at or before line {}", line + 1);
        return Ok(());
    };
    let node = index.node(target);
    let msg = Msg::focus_node(node.line, node.label.clone());

    app.dispatch(msg);
    let instructions = app.take_expansion();

    let index = app.model().index().context("no outline was produced")?;
    println!("{}", instructions_text(index, &instructions));
    println!();
    println!("{}", render_tree(app.model(), true, false));
    Ok(())
}

fn watch(app: &mut App, run: &RunConfig, debounce: Duration) -> Result<()> {
    let mut paths: Vec<PathBuf> = vec![run.file.clone()];
    paths.extend(run.symbols.iter().cloned());
    let watcher = FileWatcher::new(&paths, debounce)
        .with_context(|| format!("watching {}", run.file.display()))?;

    let print = |model: &OutlineModel| {
        let node_count = model.index().map_or(0, |i| i.len());
        println!(
            "# {} (revision {}, {} nodes)",
            model.document.display_name(),
            model.requested_revision,
            node_count
        );
        let text = render_tree(model, false, run.show_kinds);
        if !text.is_empty() {
            println!("{}", text);
        }
    };

    print(app.model());
    app.watch(&watcher, print)
}

/// Print where settings and logs live, then the settings in effect as YAML
fn config(write: bool) -> Result<()> {
    let config = OutlineConfig::load();
    let shown = |path: Option<PathBuf>| {
        path.map_or_else(|| "unavailable".to_string(), |p| p.display().to_string())
    };

    println!("# config file: {}", shown(config_paths::config_file()));
    println!("# log file: {}", shown(config_paths::log_file()));
    print!("{}", config.to_yaml().map_err(anyhow::Error::msg)?);

    if write {
        config.save().map_err(anyhow::Error::msg)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    docoutline::tracing::init();

    let args = CliArgs::parse();
    if let Some(write) = args.config_request() {
        return config(write);
    }
    let run = match args.into_config() {
        Ok(run) => run,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    let mut config = OutlineConfig::load();
    run.overrides.apply(&mut config);
    let debounce = Duration::from_millis(config.watch_debounce_ms);

    let document = Document::from_file(run.file.clone())
        .with_context(|| format!("reading {}", run.file.display()))?;
    let source = symbol_source(&run, &document);
    tracing::info!(
        "Outlining {} ({}) with '{}' symbols",
        document.display_name(),
        document.language.display_name(),
        source.name()
    );

    let mut app = App::new(OutlineModel::new(document, config), source);
    app.load(FETCH_TIMEOUT)?;

    match run.mode {
        RunMode::Show { json } => show(&app, &run, json),
        RunMode::At { line, json } => at(&app, line, json),
        RunMode::Focus { line } => focus(&mut app, line),
        RunMode::Watch => watch(&mut app, &run, debounce),
    }
}
