//! Quote a binary STL file
//!
//! ```text
//! cargo run --example quote -- part.stl petg 3
//! ```
//!
//! Without arguments a 20 mm demo cube is written to a temp folder and quoted.

use nalgebra::Vector3;
use std::path::PathBuf;
use stl_quote::{
    analyze_stl, format_dimensions, format_price, format_volume, format_weight, LogFile,
    ManufacturingType, ParseOptions, PricingBreakdown, TempFolder, Utils,
    DEFAULT_UPLOAD_LIMIT_BYTES,
};

/// Price used when an upload cannot be analyzed
const FALLBACK_PRICE: f64 = 50.0;

fn main() -> stl_quote::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let material = args.get(1).map(String::as_str).unwrap_or("pla");
    let quantity: u32 = args.get(2).and_then(|q| q.parse().ok()).unwrap_or(1);

    let tmp = TempFolder::new()?;
    let path = match args.first() {
        Some(path) => PathBuf::from(path),
        None => {
            let path = tmp.path().join("demo_cube.stl");
            Utils::msh_create_cube(Vector3::repeat(20.0), Vector3::zeros()).save_stl(&path)?;
            path
        }
    };

    let log = LogFile::new(Some(tmp.path().join("quote.log").as_path()), true)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let bytes = std::fs::read(&path)?;
    let options = ParseOptions::for_upload_limit(DEFAULT_UPLOAD_LIMIT_BYTES);

    let unit_price = match analyze_stl(&bytes, material, &options) {
        Ok(result) => {
            log.log_analysis(&file_name, &result)?;
            println!("Dimensions:    {}", format_dimensions(&result.bounding_box));
            println!("Surface area:  {:.1} mm²", result.surface_area);
            println!("Mesh volume:   {}", format_volume(result.mesh_volume));
            println!("Print volume:  {}", format_volume(result.volume));
            println!("Weight:        {}", format_weight(result.weight));
            result.cost(1)
        }
        Err(err) => {
            log.log_failure(&file_name, &err)?;
            println!("Could not analyze {}, using fallback price", file_name);
            FALLBACK_PRICE
        }
    };

    let breakdown = PricingBreakdown::new(unit_price, quantity, ManufacturingType::AtHome, None)?;
    println!("Unit price:    {}", format_price(unit_price));
    println!("Order total:   {} ({} pcs)", format_price(breakdown.order_total), quantity);

    Ok(())
}
