use shoot_margin::report::{render_breakdown, render_dashboard, render_reference, render_team};
use shoot_margin::{
    CalculatorSession, DisplayCurrency, InputField, ProjectType, Settings, coerce_amount,
    load_config_from_json, load_reference_from_csv, save_config_to_json, save_reference_to_csv,
};
use std::io::{self, Write};

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show the profitability dashboard\n  fields                             List editable input fields\n  set <field> <value>                Set quote, a cost bucket, or total days\n  team                               Show team-day allocations\n  team <member> <days>               Set days for a team member\n  overhead <on|off>                  Include overhead in net profit\n  currency <jpy|usd>                 Switch display currency\n  presets                            List past-job presets\n  preset <key>                       Load a preset (quote, costs, days)\n  project name <text...>             Set project name\n  project client <text...>           Set client name\n  project type <type>                Set project type\n  breakdown                          Show fully loaded cost breakdown\n  reference                          Show 2025 past-job margins\n  reference load <csv_path>          Load reference jobs from CSV\n  reference save <csv_path>          Save reference jobs to CSV\n  config show                        Show roster and benchmarks\n  config load <json_path>            Load calculator config from JSON\n  config save <json_path>            Save calculator config to JSON\n  reset                              Restore default inputs\n  quit|exit                          Exit"
    );
}

fn print_fields() {
    println!("Input fields:");
    for (key, description) in InputField::variants() {
        println!("  {:<24} {}", key, description);
    }
}

fn print_presets(session: &CalculatorSession) {
    println!("Available presets:");
    for preset in session.config().presets.presets() {
        println!("  {:<24} {}", preset.key, preset.label);
    }
}

fn print_config(session: &CalculatorSession) {
    let config = session.config();
    let b = &config.benchmarks;
    println!("Team members       : {}", config.roster.len());
    for member in config.roster.members() {
        println!(
            "  {:<10} {:<10} monthly {:>9} daily {:>7}",
            member.id, member.name, member.monthly_salary, member.daily_rate
        );
    }
    println!(
        "Margins            : low {} / good {} / great {} (avg {})",
        b.low_margin, b.good_margin, b.great_margin, b.avg_margin
    );
    println!(
        "Overhead           : {} per month / {} working days",
        b.monthly_overhead, b.working_days_per_month
    );
    println!("JPY per USD        : {}", config.jpy_per_usd);
}

fn rest_of_line<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(" ")
}

fn main() {
    env_logger::init();

    let mut session = match Settings::from_env().load_config() {
        Ok(config) => CalculatorSession::new(config),
        Err(e) => {
            println!("Config error: {}. Using built-in configuration.", e);
            CalculatorSession::default()
        }
    };

    println!("Shoot Margin (CLI) - type 'help' for commands\n");
    print!("{}", render_dashboard(&session));

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => print!("{}", render_dashboard(&session)),
            "fields" => print_fields(),
            "set" => match (parts.next(), parts.next()) {
                (Some(field_s), Some(value_s)) => match field_s.parse::<InputField>() {
                    Ok(field) => {
                        let value = coerce_amount(value_s);
                        session.set_field(field, value);
                        println!("{} set to {}.", field, value);
                        print!("{}", render_dashboard(&session));
                    }
                    Err(e) => println!("Error: {}", e),
                },
                _ => println!("Usage: set <field> <value>"),
            },
            "team" => match (parts.next(), parts.next()) {
                (None, _) => print!("{}", render_team(&session)),
                (Some(member), Some(days_s)) => {
                    let days = coerce_amount(days_s);
                    match session.set_team_days(member, days) {
                        Ok(_) => {
                            println!("{} set to {} days.", member, days);
                            print!("{}", render_team(&session));
                        }
                        Err(e) => println!("Error: {}", e),
                    }
                }
                _ => println!("Usage: team <member> <days>"),
            },
            "overhead" => {
                let flag = match parts.next().map(|s| s.to_ascii_lowercase()) {
                    Some(s) if s == "on" || s == "true" => true,
                    Some(s) if s == "off" || s == "false" => false,
                    _ => {
                        println!("Usage: overhead <on|off>");
                        continue;
                    }
                };
                session.set_include_overhead(flag);
                println!("Overhead {}.", if flag { "included" } else { "excluded" });
                print!("{}", render_dashboard(&session));
            }
            "currency" => match parts.next().map(str::parse::<DisplayCurrency>) {
                Some(Ok(currency)) => {
                    session.set_currency(currency);
                    print!("{}", render_dashboard(&session));
                }
                Some(Err(e)) => println!("Error: {}", e),
                None => println!("Usage: currency <jpy|usd>"),
            },
            "presets" => print_presets(&session),
            "preset" => match parts.next() {
                Some(key) => {
                    if session.apply_preset(key) {
                        println!("Loaded preset '{}'.", key);
                        print!("{}", render_dashboard(&session));
                    } else {
                        println!("Unknown preset '{}'. Inputs unchanged.", key);
                    }
                }
                None => println!("Usage: preset <key>"),
            },
            "project" => {
                let sub = parts.next();
                let mut project = session.input().project.clone();
                match sub {
                    Some("name") => project.name = rest_of_line(parts),
                    Some("client") => project.client = rest_of_line(parts),
                    Some("type") => match parts.next().map(str::parse::<ProjectType>) {
                        Some(Ok(kind)) => project.project_type = kind,
                        Some(Err(e)) => {
                            println!("Error: {}", e);
                            continue;
                        }
                        None => {
                            let kinds: Vec<&str> =
                                ProjectType::variants().iter().map(|(k, _)| *k).collect();
                            println!("Usage: project type <{}>", kinds.join("|"));
                            continue;
                        }
                    },
                    _ => {
                        println!("Usage: project <name|client|type> <value>");
                        continue;
                    }
                }
                session.set_project(project);
                println!("Project updated.");
            }
            "breakdown" => print!("{}", render_breakdown(&session)),
            "reference" => match (parts.next(), parts.next()) {
                (None, _) => print!(
                    "{}",
                    render_reference(
                        session.reference(),
                        session.currency(),
                        session.config().jpy_per_usd
                    )
                ),
                (Some("load"), Some(path)) => match load_reference_from_csv(path) {
                    Ok(table) => {
                        println!("Reference jobs loaded from {} ({} rows).", path, table.len());
                        session.set_reference(table);
                    }
                    Err(e) => println!("Load error: {}", e),
                },
                (Some("save"), Some(path)) => {
                    match save_reference_to_csv(session.reference(), path) {
                        Ok(_) => println!("Reference jobs saved to {}.", path),
                        Err(e) => println!("Save error: {}", e),
                    }
                }
                _ => println!("Usage: reference [load|save <csv_path>]"),
            },
            "config" => match (parts.next(), parts.next()) {
                (Some("show"), _) => print_config(&session),
                (Some("load"), Some(path)) => match load_config_from_json(path) {
                    Ok(config) => match session.replace_config(config) {
                        Ok(_) => {
                            println!("Config loaded from {}.", path);
                            print!("{}", render_dashboard(&session));
                        }
                        Err(e) => println!("Config error: {}", e),
                    },
                    Err(e) => println!("Load error: {}", e),
                },
                (Some("save"), Some(path)) => match save_config_to_json(session.config(), path) {
                    Ok(_) => println!("Config saved to {}.", path),
                    Err(e) => println!("Save error: {}", e),
                },
                _ => println!("Usage: config <show|load <json_path>|save <json_path>>"),
            },
            "reset" => {
                session.reset();
                println!("Inputs reset to defaults.");
                print!("{}", render_dashboard(&session));
            }
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
