use anyhow::Result;

pub fn run() -> Result<()> {
    let detectors = solbench_detectors::all_detectors();

    println!(
        "{:<24} {:<10} {:<12} {:<22} Description",
        "Name", "Severity", "Confidence", "Corroborates"
    );
    println!("{}", "-".repeat(100));

    for d in &detectors {
        let class = d
            .corroborates()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:<10} {:<12} {:<22} {}",
            d.name(),
            d.severity(),
            d.confidence(),
            class,
            d.description()
        );
    }

    println!("\nTotal: {} detectors", detectors.len());
    Ok(())
}
