/// CLI for predicting MOF electrode performance from a TOML request
use mof_predictor::export::export_prediction;
use mof_predictor::material::MaterialTables;
use mof_predictor::{LiteratureCatalog, Prediction, PredictionRequest, Predictor};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let ok = match command.as_str() {
        "predict" => predict(&args[2..]),
        "compare" => compare(&args[2..]),
        "metals" => list_metals(),
        "catalog" => list_catalog(),
        "template" => write_template(&args[2..]),
        _ => {
            println!("Unknown command: {}", command);
            print_usage();
            false
        }
    };

    if !ok {
        process::exit(1);
    }
}

fn print_usage() {
    println!("\nMOF Predictor - electrochemical performance estimates\n");
    println!("Usage: mof_predictor <command> [options]\n");
    println!("Commands:");
    println!("  predict <request.toml> [out_dir]   Predict metrics, curves and agreement");
    println!("  compare <request.toml>             Print metrics and literature agreement only");
    println!("  metals                             List curated metal properties");
    println!("  catalog                            List built-in literature references");
    println!("  template <file.toml>               Write an example request\n");
    println!("Set RUST_LOG=debug for detailed logs.\n");
}

fn load_request(args: &[String], usage: &str) -> Option<PredictionRequest> {
    let Some(path) = args.first() else {
        println!("Error: Please specify a request file");
        println!("Usage: mof_predictor {}", usage);
        return None;
    };
    match PredictionRequest::from_file(path) {
        Ok(request) => Some(request),
        Err(e) => {
            println!("Error loading request: {}", e);
            None
        }
    }
}

fn print_summary(prediction: &Prediction) {
    let config = &prediction.configuration;
    let metrics = &prediction.metrics;
    println!(
        "\nConfiguration: {} ({}, {}, {}, valency {})",
        config.lookup_key(),
        config.assembly(),
        config.electrode(),
        if config.is_mof() { "MOF" } else { "bulk" },
        config.valency()
    );
    println!("  Capacity:   {:>8.2} mAh/g", metrics.capacity_mah_g);
    println!("  Resistance: {:>8.2} Ω", metrics.base_resistance_ohm);
    println!("  Retention:  {:>8.2} %", metrics.retention_fraction * 100.0);

    match &prediction.comparison {
        Some(cmp) if cmp.matched => {
            if let Some(reference) = &cmp.reference {
                println!(
                    "\nLiterature: {} ({}, {} {})",
                    reference.paper_title, reference.authors, reference.journal, reference.year
                );
                println!("  DOI: {}", reference.doi);
            }
            let show = |name: &str, diff: Option<f64>| {
                if let Some(d) = diff {
                    println!("  {:<11} {:>+7.2} %", name, d);
                }
            };
            show("Capacity:", cmp.capacity_pct_diff);
            show("Resistance:", cmp.resistance_pct_diff);
            show("Retention:", cmp.retention_pct_diff);
            println!("  Agreement: {}", cmp.agreement_level);
        }
        Some(cmp) => println!("\nLiterature: {}", cmp.agreement_level),
        None => {}
    }
    println!();
}

fn predict(args: &[String]) -> bool {
    let Some(request) = load_request(args, "predict <request.toml> [out_dir]") else {
        return false;
    };

    let predictor = Predictor::default();
    let prediction = match predictor.predict(&request) {
        Ok(p) => p,
        Err(e) => {
            println!("Error: {}", e);
            return false;
        }
    };
    print_summary(&prediction);

    println!("{:>10} {:>14} {:>14} {:>12}", "j (A/g)", "Q (C/g)", "C (F/g)", "rate mAh/g");
    for (row, rate) in prediction.capacity_table.iter().zip(&prediction.rate_capability) {
        println!(
            "{:>10.2} {:>14.2} {:>14.2} {:>12.2}",
            row.current_density_a_g,
            row.specific_capacity_c_g,
            row.specific_capacitance_f_g,
            rate.capacity_mah_g
        );
    }

    let (fresh, cycled) = (&prediction.eis.circuit, &prediction.eis_cycled.circuit);
    println!("\nEIS fit   Rs {:>6.2} Ω   Rct {:>6.2} Ω", fresh.rs_ohm, fresh.rct_ohm);
    println!("Cycled    Rs {:>6.2} Ω   Rct {:>6.2} Ω", cycled.rs_ohm, cycled.rct_ohm);

    let output_dir = args.get(1).map(String::as_str).unwrap_or("mof_results");
    match export_prediction(&prediction, output_dir) {
        Ok(paths) => {
            println!("\nWrote {} files to {}\n", paths.len(), output_dir);
            true
        }
        Err(e) => {
            println!("Error exporting results: {}", e);
            false
        }
    }
}

fn compare(args: &[String]) -> bool {
    let Some(mut request) = load_request(args, "compare <request.toml>") else {
        return false;
    };
    request.compare = true;

    match Predictor::default().predict(&request) {
        Ok(prediction) => {
            print_summary(&prediction);
            true
        }
        Err(e) => {
            println!("Error: {}", e);
            false
        }
    }
}

fn list_metals() -> bool {
    let tables = MaterialTables::curated();
    println!(
        "\n{:<6} {:>8} {:>13} {:>9} {:>10} {:>9}",
        "Metal", "Redox", "Conductivity", "Color", "Plasmon", "d-band"
    );
    for m in tables.metals.iter() {
        println!(
            "{:<6} {:>8.2} {:>13.2} {:>9} {:>7.1} eV {:>6.1} eV",
            m.symbol,
            m.redox_factor,
            m.conductivity,
            m.color_hex(),
            m.plasmon_peak_ev,
            m.d_transition_ev
        );
    }
    println!();
    true
}

fn list_catalog() -> bool {
    let catalog = LiteratureCatalog::builtin();
    println!("\n{} references:\n", catalog.len());
    for r in catalog.iter() {
        println!(
            "  {:<20} {:>7.1} mAh/g {:>6.2} Ω {:>5.1} %  {} ({})",
            r.key,
            r.reference_capacity,
            r.reference_resistance,
            r.reference_retention * 100.0,
            r.authors,
            r.year
        );
    }
    println!();
    true
}

fn write_template(args: &[String]) -> bool {
    let Some(path) = args.first() else {
        println!("Error: Please specify output file name");
        println!("Usage: mof_predictor template <file.toml>");
        return false;
    };
    match PredictionRequest::template().to_file(path) {
        Ok(()) => {
            println!("Request template written: {}", path);
            true
        }
        Err(e) => {
            println!("Error writing template: {}", e);
            false
        }
    }
}
