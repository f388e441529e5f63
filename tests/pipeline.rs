use std::path::{Path, PathBuf};

use energy_profile::config::{DiagramConfig, ExportFormat};
use energy_profile::data::build_from_file;
use energy_profile::data::loader::LoadError;
use energy_profile::data::model::Cell;
use energy_profile::render;
use tempfile::TempDir;

const HEADER: &str = "Index,Molecule,E,G,\"ΔE, kcal/mol\",\"ΔG, kcal/mol\",Extra,Plot,Datasource,Filenames,Category,Method,Solvent,Additive";

struct Group<'a> {
    index: i64,
    method: &'a str,
    solvent: &'a str,
    plot: &'a str,
    /// Seven profile energies; `None` leaves the cell blank.
    energies: [Option<f64>; 7],
}

/// One 12-row block per group, key columns written once per block.
fn write_table(path: &Path, groups: &[Group]) {
    let mut text = String::new();
    text.push_str(HEADER);
    text.push('\n');
    for g in groups {
        for r in 0..11 {
            let dg = match r {
                3..=9 => g.energies[r - 3].map(|v| v.to_string()).unwrap_or_default(),
                _ => "-1.0".to_string(),
            };
            let first = r == 0;
            let key = |v: &str| if first { v.to_string() } else { String::new() };
            let fields = [
                key(&g.index.to_string()),
                format!("mol{r}"),
                "-100.0".to_string(),
                "-99.9".to_string(),
                "0.0".to_string(),
                dg,
                String::new(),
                key(g.plot),
                key("orca"),
                key("job.out"),
                key("cat"),
                key(g.method),
                key(g.solvent),
                key("none"),
            ];
            text.push_str(&fields.join(","));
            text.push('\n');
        }
        text.push_str(&",".repeat(13));
        text.push('\n');
    }
    std::fs::write(path, text).unwrap();
}

fn full(values: [f64; 7]) -> [Option<f64>; 7] {
    values.map(Some)
}

fn config() -> DiagramConfig {
    let mut cfg = DiagramConfig::default();
    cfg.table.target_method = None;
    cfg
}

fn table_path(dir: &TempDir) -> PathBuf {
    dir.path().join("energies.csv")
}

#[test]
fn gaps_are_bridged_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = table_path(&dir);
    write_table(
        &path,
        &[Group {
            index: 1,
            method: "DLPNO//r^2SCAN-3c",
            solvent: "No",
            plot: "Yes",
            energies: [Some(0.0), None, Some(12.5), Some(-3.0), None, Some(-9.1), Some(-20.0)],
        }],
    );

    let d = build_from_file(&path, &config()).unwrap();
    assert_eq!(d.levels.len(), 5);
    assert_eq!(
        d.levels.iter().map(|l| l.position).collect::<Vec<_>>(),
        vec![0, 2, 3, 5, 6]
    );
    assert_eq!(d.levels[1].value, 12.5);
    let pairs: Vec<(usize, usize)> = d
        .links
        .iter()
        .map(|l| (d.levels[l.from].position, d.levels[l.to].position))
        .collect();
    assert_eq!(pairs, vec![(0, 2), (2, 3), (3, 5), (5, 6)]);
}

#[test]
fn clusters_follow_index_changes() {
    let dir = TempDir::new().unwrap();
    let path = table_path(&dir);
    let e = full([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let g = |index, method| Group {
        index,
        method,
        solvent: "No",
        plot: "Yes",
        energies: e,
    };
    write_table(
        &path,
        &[g(2, "DLPNO-a"), g(1, "DLPNO-a"), g(1, "DLPNO-b"), g(2, "DLPNO-b"), g(1, "DLPNO-c")],
    );

    let d = build_from_file(&path, &config()).unwrap();
    assert_eq!(d.groups.len(), 5);
    assert_eq!(
        d.groups.iter().map(|g| g.cluster).collect::<Vec<_>>(),
        vec![0, 0, 0, 1, 1]
    );
    assert_eq!(d.groups[0].key.index, Cell::Integer(1));
    assert_eq!(d.levels.len(), 35);
    assert_eq!(d.links.len(), 30);
}

#[test]
fn target_method_and_plot_flag_filter_groups() {
    let dir = TempDir::new().unwrap();
    let path = table_path(&dir);
    let e = full([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    write_table(
        &path,
        &[
            Group { index: 1, method: "DLPNO//r^2SCAN-3c", solvent: "No", plot: "Yes", energies: e },
            Group { index: 1, method: "r2SCAN-3c", solvent: "No", plot: "Yes", energies: e },
            Group { index: 2, method: "DLPNO//r^2SCAN-3c", solvent: "water", plot: "No", energies: e },
        ],
    );

    let d = build_from_file(&path, &DiagramConfig::default()).unwrap();
    assert_eq!(d.groups.len(), 1);
    assert_eq!(d.group_labels(), vec!["DLPNO//r^2SCAN\u{2212}3c".to_string()]);
    assert!(d.levels.iter().all(|l| l.opacity == 1.0));
}

#[test]
fn non_dlpno_methods_use_default_opacity() {
    let dir = TempDir::new().unwrap();
    let path = table_path(&dir);
    let e = full([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    write_table(
        &path,
        &[Group { index: 1, method: "r2SCAN-3c", solvent: "water", plot: "Yes", energies: e }],
    );

    let mut cfg = config();
    cfg.style.default_opacity = 0.5;
    let d = build_from_file(&path, &cfg).unwrap();
    assert!(d.levels.iter().all(|l| l.opacity == 0.5));
    assert!(d.group_labels()[0].ends_with("(water)"));
}

#[test]
fn nothing_flagged_gives_empty_diagram_and_export() {
    let dir = TempDir::new().unwrap();
    let path = table_path(&dir);
    let e = full([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    write_table(
        &path,
        &[
            Group { index: 1, method: "DLPNO//r^2SCAN-3c", solvent: "No", plot: "No", energies: e },
            Group { index: 2, method: "DLPNO//r^2SCAN-3c", solvent: "No", plot: "No", energies: e },
        ],
    );

    let mut cfg = config();
    let d = build_from_file(&path, &cfg).unwrap();
    assert!(d.levels.is_empty());
    assert!(d.links.is_empty());
    assert!(d.groups.is_empty());

    cfg.output.path = dir.path().join("out/sub/profile");
    cfg.output.formats = vec![ExportFormat::Svg];
    let written = render::export_all(&d, &cfg).unwrap();
    assert_eq!(written, vec![dir.path().join("out/sub/profile.svg")]);
    assert!(written[0].exists());
}

#[test]
fn missing_columns_are_a_load_error() {
    let dir = TempDir::new().unwrap();
    let path = table_path(&dir);
    std::fs::write(&path, "Index,Method\n1,DLPNO\n").unwrap();
    let err = build_from_file(&path, &config()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn(_)));
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let err = build_from_file(&dir.path().join("absent.xlsx"), &config()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
