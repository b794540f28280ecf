use anyhow::Result;

fn main() -> Result<()> {
    let matches = loop_cli::command().get_matches();
    let config = loop_cli::load_config(&matches)?;

    loop_cli::init_logging(&config.log_filter);
    tracing::debug!(?config, "configuration loaded");

    let output = loop_cli::run(&matches, config)?;
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
