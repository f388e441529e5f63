//! Write `sample_energies.csv`, a small energy table in the expected schema.
//!
//! Every group is 11 data rows plus one blank separator row; the key columns
//! are filled only on the first row of a group, the way the spreadsheet is
//! maintained by hand.

const HEADERS: [&str; 14] = [
    "Index",
    "Molecule",
    "E, Eh",
    "H, Eh",
    "G, Eh",
    "ΔE, kcal/mol",
    "ΔG, kcal/mol",
    "Plot",
    "Datasource",
    "Filenames",
    "Category",
    "Method",
    "Solvent",
    "Additive",
];

const SPECIES: [&str; 11] = [
    "substrate", "oxidant", "catalyst", "Reagents", "A", "TS1", "B", "TS2", "C", "Products", "by-product",
];

const HARTREE_TO_KCAL: f64 = 627.509;

/// Relative free energies of the seven profile points for one pathway.
fn profile(index: usize, shift: f64) -> [f64; 7] {
    let base = [0.0, -8.4, 14.2, -3.1, 19.7, -12.6, -21.3];
    let mut out = [0.0; 7];
    for (k, (o, b)) in out.iter_mut().zip(base).enumerate() {
        *o = if k == 0 { 0.0 } else { b + shift + index as f64 * 1.7 };
    }
    out
}

fn main() {
    let groups: [(usize, &str, &str, &str, &str, f64, &str); 6] = [
        (1, "Oxidation", "DLPNO//r^2SCAN-3c", "No", "None", 0.0, "Yes"),
        (1, "Oxidation", "DLPNO//r^2SCAN-3c", "water", "None", -1.8, "Yes"),
        (1, "Oxidation", "r2SCAN-3c", "No", "None", 2.4, "Yes"),
        (2, "Oxidation", "DLPNO//r^2SCAN-3c", "No", "NaOAc", -3.2, "Yes"),
        (2, "Oxidation", "wB97X-D3", "water", "NaOAc", 1.1, "Yes"),
        (3, "Reduction", "DLPNO//r^2SCAN-3c", "No", "None", 4.0, "No"),
    ];

    let output_path = "sample_energies.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer.write_record(HEADERS).expect("Failed to write header");

    let mut rows = 0usize;
    for (index, category, method, solvent, additive, shift, plot) in groups {
        let points = profile(index, shift);
        // leave the TS2 point blank in one pathway to show a bridged gap
        let skip_ts2 = method == "r2SCAN-3c";

        for (r, species) in SPECIES.iter().enumerate() {
            let first = r == 0;
            let dg = match r {
                3..=9 if skip_ts2 && r == 7 => None,
                3..=9 => Some(points[r - 3]),
                _ => None,
            };
            let e = -450.0 - r as f64 * 3.25 + dg.unwrap_or(0.0) / HARTREE_TO_KCAL;

            let fmt = |v: Option<f64>| v.map(|v| format!("{v:.4}")).unwrap_or_default();
            let key = |v: &str| if first { v.to_string() } else { String::new() };

            writer
                .write_record([
                    key(&index.to_string()),
                    species.to_string(),
                    format!("{e:.6}"),
                    format!("{:.6}", e + 0.142),
                    format!("{:.6}", e + 0.098),
                    fmt(dg.map(|g| g + 1.3)),
                    fmt(dg),
                    key(plot),
                    key("orca"),
                    key(&format!("run_{index}_{rows}.out")),
                    key(category),
                    key(method),
                    key(solvent),
                    key(additive),
                ])
                .expect("Failed to write row");
            rows += 1;
        }

        writer
            .write_record(HEADERS.map(|_| ""))
            .expect("Failed to write separator");
        rows += 1;
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} rows ({} groups) to {output_path}", groups.len());
}
