use clap::{Arg, Command};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = Command::new("recode")
        .about("Rewrite a line-oriented file from one compression format to another")
        .arg(Arg::new("input").required(true))
        .arg(Arg::new("output").required(true))
        .get_matches();

    let input = matches.get_one::<String>("input").unwrap();
    let output = matches.get_one::<String>("output").unwrap();

    linezip::stream::recode(input, output)?;

    eprintln!("{} -> {}", input, output);
    Ok(())
}
