use bash_mini::config::ShellConfig;
use bash_mini::flags::Flags;
use bash_mini::logging;
use bash_mini::shell::Shell;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = flags.parse(&args) {
        eprintln!("bash-mini: {}", e);
        eprint!("{}", flags.help());
        return ExitCode::FAILURE;
    }

    if flags.is_set("help") {
        print!("{}", flags.help());
        return ExitCode::SUCCESS;
    }

    if flags.is_set("version") {
        println!("bash-mini {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    logging::init(flags.is_set("debug"));

    let mut shell = Shell::new(ShellConfig::from_flags(&flags));
    match shell.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
