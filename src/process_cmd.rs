//! Process command: derive physical and radar fields from a spectra table.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{info, info_span};

use pluvio_dsd::FieldKind;
use pluvio_moments::{r_kdp_relation, r_zh_relation, register_physical_fields};
use pluvio_radar::{register_radar_fields, RadarProcessor};

use crate::cli::ProcessArgs;
use crate::config::PluvioConfig;
use crate::convert;
use crate::input;
use crate::output::{self, ProcessOutput, Relations};

/// Run the field-derivation pipeline.
pub fn run(args: ProcessArgs) -> Result<()> {
    let _cmd = info_span!("process").entered();

    // 1. Load project TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: PluvioConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    // 2. Read the normalized spectra table
    let input_path = args
        .input
        .as_ref()
        .or(config.io.input.as_ref())
        .ok_or_else(|| {
            anyhow::anyhow!("no input path: set [io].input in config or use --input")
        })?;
    let mut container = input::read_spectra(input_path)?;

    // 3. Register calculators
    register_physical_fields(&mut container);

    let with_radar = args.radar || args.relations;
    if with_radar {
        let table_path = config.radar.scattering_table.as_ref().ok_or_else(|| {
            anyhow::anyhow!("radar moments requested but [radar].scattering_table is not set")
        })?;
        let table = input::read_scattering_table(table_path)?;
        let radar_config = convert::build_radar_config(&config.radar)?;
        let processor = Arc::new(
            RadarProcessor::new(radar_config, Arc::new(table))
                .context("failed to build radar processor")?,
        );
        register_radar_fields(&mut container, processor);
    }

    // 4. Assemble the field list
    let mut names: Vec<String> = config.process.fields.clone();
    if with_radar {
        for kind in [FieldKind::Zh, FieldKind::Zv, FieldKind::Zdr, FieldKind::Kdp, FieldKind::Ai]
        {
            names.push(kind.as_str().to_string());
        }
    }

    if container.is_empty() {
        bail!("spectra document contains no samples");
    }

    // 5. Compute
    let mut fields: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for name in &names {
        let values = container
            .field_by_name(name)
            .with_context(|| format!("failed to compute field {name:?}"))?
            .to_vec();
        fields.insert(name.clone(), values);
    }
    info!(n_fields = fields.len(), n_spectra = container.len(), "fields computed");

    // 6. Rainfall relationships
    let relations = if args.relations {
        let rain_rate = fields
            .get("rain_rate")
            .ok_or_else(|| anyhow::anyhow!("relations require the rain_rate field"))?;
        let r_kdp = fields.get("kdp").and_then(|kdp| r_kdp_relation(rain_rate, kdp));
        let r_zh = fields.get("zh").and_then(|zh| r_zh_relation(rain_rate, zh));
        if r_kdp.is_none() && r_zh.is_none() {
            info!("too few rainy samples for power-law relationships");
        }
        Some(Relations {
            r_kdp: r_kdp.map(Into::into),
            r_zh: r_zh.map(Into::into),
        })
    } else {
        None
    };

    // 7. Write output JSON
    let out = ProcessOutput {
        metadata: output::metadata(&container),
        time: container.timestamps(),
        fields,
        relations,
    };
    let out_path: PathBuf = args
        .output
        .or(config.io.output.clone())
        .unwrap_or_else(|| input_path.with_extension("fields.json"));

    std::fs::write(&out_path, output::to_json(&out)?)
        .with_context(|| format!("failed to write output: {}", out_path.display()))?;
    info!(path = %out_path.display(), "derived fields written");

    Ok(())
}
