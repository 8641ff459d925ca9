use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use reknit_errors::Renderer;
use reknit_manipulation::helpers;
use reknit_parse::ScriptParser;
use reknit_project::{ManipulationSettings, Node, Project};
use reknit_syntax::SyntaxKind::IDENTIFIER;
use reknit_syntax::SyntaxNode;

#[derive(Parser)]
struct Options {
    /// Text of one indentation level in generated code.
    #[arg(long, global = true, default_value = "    ")]
    indent: String,
    /// Write the result back to the file instead of printing it.
    #[arg(long, global = true)]
    write: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report syntax errors.
    Check { path: Utf8PathBuf },
    RemoveStatement {
        path: Utf8PathBuf,
        #[arg(long)]
        index: usize,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    Reorder {
        path: Utf8PathBuf,
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },
    /// Rename every identifier spelled like `from`.
    Rename {
        path: Utf8PathBuf,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Replace the block statement at `index` with its statements.
    Unwrap {
        path: Utf8PathBuf,
        #[arg(long)]
        index: usize,
    },
    /// Re-parse and reconcile without changing anything.
    Format { path: Utf8PathBuf },
}

impl Command {
    fn path(&self) -> &Utf8Path {
        match self {
            Self::Check { path }
            | Self::RemoveStatement { path, .. }
            | Self::Reorder { path, .. }
            | Self::Rename { path, .. }
            | Self::Unwrap { path, .. }
            | Self::Format { path } => path,
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;
    use tracing_subscriber::{EnvFilter, fmt};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let Options { indent, write, command } = Options::parse();

    let path = command.path().to_owned();
    let text = std::fs::read_to_string(&path).with_context(|| format!("failed to read `{path}`"))?;

    let settings = ManipulationSettings::default().with_indent(indent);
    let mut project = Project::new(ScriptParser).with_settings(settings);
    let file = project.add_source_file(path.clone(), &text)?;

    match command {
        Command::Check { .. } => {
            let renderer = Renderer::styled();
            let diagnostics = project.diagnostics(file)?;
            for diagnostic in diagnostics {
                eprintln!("{}", diagnostic.render(&renderer, path.as_str(), &text));
            }
            anyhow::ensure!(diagnostics.is_empty(), "`{path}` has {} syntax errors", diagnostics.len());
            return Ok(());
        }
        Command::RemoveStatement { index, count, .. } => {
            helpers::remove_statements(&mut project, file, index..index + count)?;
        }
        Command::Reorder { from, to, .. } => helpers::change_child_order(&mut project, file, from, to)?,
        Command::Rename { from, to, .. } => {
            let identifier = find_identifier(&mut project, file, &from)?;
            let count = helpers::rename_identifier(&mut project, identifier, &to)?;
            tracing::info!(count, %from, %to, "renamed");
        }
        Command::Unwrap { index, .. } => {
            let statement = project
                .statements(file)?
                .get(index)
                .copied()
                .with_context(|| format!("`{path}` has no statement {index}"))?;
            helpers::unwrap_node(&mut project, statement)?;
        }
        Command::Format { .. } => helpers::format_noop(&mut project, file)?,
    }

    let new_text = project.full_text(file)?;
    if write {
        std::fs::write(&path, new_text).with_context(|| format!("failed to write `{path}`"))?;
    } else {
        print!("{new_text}");
    }
    Ok(())
}

fn find_identifier(project: &mut Project, file: Node, name: &str) -> anyhow::Result<Node> {
    let id = project
        .tree(file)?
        .root()
        .descendants()
        .into_iter()
        .find(|node| node.kind() == IDENTIFIER && node.text() == name)
        .map(SyntaxNode::id)
        .with_context(|| format!("no identifier named `{name}`"))?;
    Ok(project.get_or_create(file, id)?)
}
