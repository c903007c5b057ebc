use serde_json::json;
use sheetlens::config::EngineConfig;
use sheetlens::dashboard;
use sheetlens::ir::{DetailLevel, GraphIR};
use sheetlens::record::{self, RawGrid};
use sheetlens::source::{CellRange, load_grid};
use sheetlens::svg::SvgRenderer;
use std::env;
use std::fs;
use std::path::Path;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy)]
enum Format {
    Table,
    Charts,
    Erd,
    Drawio,
    Svg,
}

impl Format {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "table" => Some(Self::Table),
            "charts" => Some(Self::Charts),
            "erd" => Some(Self::Erd),
            "drawio" => Some(Self::Drawio),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <grid.csv|grid.json> [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -f, --format <fmt>     table, charts, erd, drawio, svg (default: charts)");
    eprintln!("  -o, --output <file>    Output file (default: stdout)");
    eprintln!("  -c, --config <file>    Engine configuration JSON");
    eprintln!("  -r, --range <a1>       Crop the grid, e.g. Sheet1!A1:H100");
    eprintln!("  -s, --student <name>   Student for the GPA chart (repeatable)");
    eprintln!("  -q, --query <text>     Table filter");
    eprintln!("  -d, --detail <level>   Detail level: tables, pk, pk_fk, all (default: all)");
    eprintln!();
    eprintln!("Set RUST_LOG=debug for diagnostics on stderr.");
    process::exit(1);
}

fn fail(message: String) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut config_path: Option<String> = None;
    let mut range: Option<String> = None;
    let mut query = String::new();
    let mut students: Vec<String> = Vec::new();
    let mut format = Format::Charts;
    let mut detail = DetailLevel::All;

    let mut i = 2;
    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;
        let Some(value) = args.get(i) else {
            eprintln!("Missing value for {}", flag);
            usage(&args[0]);
        };
        match flag {
            "-f" | "--format" => {
                format = Format::from_str(value)
                    .unwrap_or_else(|| fail(format!("Invalid format: {}", value)));
            }
            "-o" | "--output" => output_path = Some(value.clone()),
            "-c" | "--config" => config_path = Some(value.clone()),
            "-r" | "--range" => range = Some(value.clone()),
            "-s" | "--student" => students.push(value.clone()),
            "-q" | "--query" => query = value.clone(),
            "-d" | "--detail" => {
                detail = DetailLevel::from_str(value)
                    .unwrap_or_else(|| fail(format!("Invalid detail level: {}", value)));
            }
            _ => {
                eprintln!("Unknown option: {}", flag);
                usage(&args[0]);
            }
        }
        i += 1;
    }

    let config = match &config_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .unwrap_or_else(|e| fail(format!("Failed to read {}: {}", path, e)));
            EngineConfig::from_json(&text).unwrap_or_else(|e| fail(e.to_string()))
        }
        None => EngineConfig::default(),
    };

    let mut grid: RawGrid =
        load_grid(Path::new(input_path)).unwrap_or_else(|e| fail(e.to_string()));
    if let Some(range) = &range {
        let cells = CellRange::parse(range).unwrap_or_else(|e| fail(e.to_string()));
        grid = cells.crop(&grid);
    }

    let records = record::parse(&grid);
    info!(records = records.len(), "grid loaded from {}", input_path);

    let output = match format {
        Format::Table => {
            let rows = record::filter_records(&records, &query);
            let table = json!({ "columns": record::columns(&grid), "rows": rows });
            serde_json::to_string_pretty(&table).unwrap_or_else(|e| fail(e.to_string()))
        }
        Format::Charts => {
            let charts = dashboard::build(&records, &config, &students)
                .unwrap_or_else(|e| fail(e.to_string()));
            serde_json::to_string_pretty(&charts).unwrap_or_else(|e| fail(e.to_string()))
        }
        Format::Erd | Format::Drawio | Format::Svg => {
            let ir = GraphIR::from_records(&records, &config.fields, detail);
            let diagram = config.layout.layout(&ir);
            match format {
                Format::Drawio => diagram.to_interchange_xml(),
                Format::Svg => SvgRenderer::default().render(&diagram),
                _ => serde_json::to_string_pretty(&diagram)
                    .unwrap_or_else(|e| fail(e.to_string())),
            }
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", output),
    }
}
