use splom_sketch::{generate, telemetry, SketchConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = telemetry::init_default_tracing();
    let config = SketchConfig::default();
    for (i, out) in generate(&config)?.iter().enumerate() {
        println!("{}", out.confirmation(i));
    }
    Ok(())
}
