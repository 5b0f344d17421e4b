mod cli;
mod config;
mod definition;
mod server;
mod utils;

use actix_web::{HttpServer, middleware::Logger, web};
use clap::Parser;
use color_eyre::eyre::Result;
use datepicker_widget::RenderEnv;
use dotenv::dotenv;

#[cfg(not(tarpaulin_include))]
async fn run() -> Result<()> {
    use cli::{ClapSource, Commands};
    use color_eyre::eyre::Context;

    let args = cli::Cli::parse();

    let config = crate::config::Config::new(Some(ClapSource::new(&args)))
        .context("Error when loading config")?;
    let env = config
        .config
        .render_env()
        .context("Error when loading translations")?;

    match &args.command {
        Commands::Render { file, no_script } => {
            let widgets = crate::trace_dbg!(definition::load(file)?);
            for widget in &widgets {
                let rendered = widget
                    .render(&env)
                    .with_context(|| format!("Error rendering {}", file.display()))?;
                println!("{}", rendered.html);
                if !no_script {
                    println!("{}", rendered.script_block());
                }
            }
            Ok(())
        }
        Commands::Web { .. } => {
            println!("Visit http://{} to view the demo page", config.web.bind);
            web_main(env, &config.web.bind).await?;
            Ok(())
        }
    }
}

async fn web_main(env: RenderEnv, bind: &str) -> std::io::Result<()> {
    let env = web::Data::new(env);

    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(Logger::default())
            .app_data(env.clone())
            .configure(server::api::config_routes)
            .route("/", web::get().to(server::serve_demo))
    })
    .bind(bind)?
    .run()
    .await
}

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<()> {
    dotenv().ok();
    utils::errors::init()?;
    utils::logging::init()?;

    let result = run().await;

    result?;

    Ok(())
}
