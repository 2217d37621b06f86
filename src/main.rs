use std::process;

use lexicon::{Config, Language};

fn main() {
    env_logger::init();

    let config = match Config::from_args(std::env::args().collect()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            Config::print_help();
            process::exit(1);
        }
    };

    if config.show_help {
        Config::print_help();
        return;
    }

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error en los ajustes: {}", e);
            process::exit(1);
        }
    };
    let amount = settings.default_amount;

    let mut language = match Language::load(&config.language, config.word_list_path(), settings) {
        Ok(language) => language,
        Err(e) => {
            eprintln!("Error cargando el idioma '{}': {}", config.language, e);
            process::exit(1);
        }
    };

    for path in &config.extra_files {
        if let Err(e) = language.add_file(path) {
            eprintln!("Error leyendo archivo '{}': {}", path.display(), e);
            process::exit(1);
        }
    }

    if config.words.is_empty() {
        eprintln!("Error: No se proporcionaron palabras para consultar.");
        eprintln!();
        Config::print_help();
        process::exit(1);
    }

    for word in &config.words {
        match language.corrections(word, amount) {
            Ok(None) => println!("{}: ok", word),
            Ok(Some(found)) if found.is_empty() => println!("{}: (sin sugerencias)", word),
            Ok(Some(found)) => println!("{}: {}", word, found.join(", ")),
            Err(e) => {
                eprintln!("Error con '{}': {}", word, e);
                process::exit(1);
            }
        }
    }
}
