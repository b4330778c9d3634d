use std::{
    fs,
    io::{self, Read, Write},
    process,
};

use blogkit::{
    application::{
        configuration::ConfigHandle,
        error::AppError,
        helpers::{BlogHelpers, TagOptions},
        render::HIGHLIGHT_CSS,
    },
    config::{self, Command, RenderArgs, TagArgs},
    infra::{error::InfraError, telemetry},
};
use tracing::{Dispatch, Level, debug, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let messages = error.messages();
    if dispatcher::has_been_set() {
        error!(error = %error, chain = ?messages, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, chain = ?messages, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    let blog_config = ConfigHandle::global();
    blog_config.replace(settings.blog);

    let command = cli_args
        .command
        .unwrap_or(Command::Render(RenderArgs::default()));

    match command {
        Command::Render(args) => run_render(BlogHelpers::new(blog_config), args),
        Command::Tag(args) => run_tag(BlogHelpers::new(blog_config), args),
        Command::Stylesheet => write_stdout(HIGHLIGHT_CSS),
    }
}

fn run_render(helpers: BlogHelpers, args: RenderArgs) -> Result<(), AppError> {
    let source = match args.file.as_ref() {
        Some(path) => fs::read_to_string(path).map_err(InfraError::from)?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(InfraError::from)?;
            buffer
        }
    };

    debug!(
        target = "blogkit::render",
        file = ?args.file,
        parser = %helpers.config().snapshot().default_parser,
        "formatting content"
    );

    let html = helpers.format_content(&source)?;
    write_stdout(&html)
}

fn run_tag(helpers: BlogHelpers, args: TagArgs) -> Result<(), AppError> {
    let mut options = TagOptions::new().with_type_name(&args.kind)?;
    if let Some(class) = args.class {
        options = options.class(class);
    }
    for (name, value) in args.attributes {
        options = options.attr(name, value);
    }

    let html = helpers.blog_tag(&args.tag, &args.content, &options)?;
    write_stdout(&html)
}

fn write_stdout(output: &str) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .map_err(InfraError::from)?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n").map_err(InfraError::from)?;
    }
    stdout.flush().map_err(InfraError::from)?;
    Ok(())
}
