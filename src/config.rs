//! Mechanism for loading and sharing the selection configuration
//!
//! The documented thresholds ship as `CutParams::default()`; this module adds
//! an optional parameter file for variation studies, in a minimal format
//! where each line carries one value as its first non-whitespace token (the
//! rest of the line is free for comments).

use crate::{
    cuts::CutParams,
    geometry::Geometry,
    numeric::Float,
    Result,
};

use anyhow::{ensure, format_err, Context, Error};

use std::{fs::File, io::Read, str::FromStr};

/// Selection configuration: cut thresholds plus detector geometry
#[derive(Debug)]
pub struct Configuration {
    /// Thresholds of the selection cuts
    pub params: CutParams,

    /// Geometry of the two detector sites
    ///
    /// Always the surveyed constants; the parameter file only varies
    /// thresholds, not the detectors themselves.
    pub geometry: Geometry,
}
//
impl Configuration {
    /// Load the configuration from a parameter file, check it, and print it
    pub fn load(file_name: &str) -> Result<Self> {
        // Read out the parameter file or die trying
        let config_str = {
            let mut config_file = File::open(file_name)
                .context(format!("Could not open parameter file {}", file_name))?;
            let mut buffer = String::new();
            config_file.read_to_string(&mut buffer)?;
            buffer
        };

        // We will iterate over the configuration items, which are the first
        // non-whitespace chunk of text on each line, ignoring blank lines.
        let mut config_iter = config_str
            .lines()
            .filter_map(|line| line.split_whitespace().next());

        // This closure fetches the next configuration item, tagging it with
        // the name of the configuration field which it is supposed to fill to
        // ease error reporting, and handling unexpected end-of-file too.
        let mut next_item = |name: &'static str| -> Result<ConfigItem> {
            config_iter
                .next()
                .map(|data| ConfigItem::new(name, data))
                .ok_or_else(|| format_err!("Missing configuration of {}", name))
        };

        // Decode the configuration items into concrete values
        let params = CutParams {
            hits_per_plane_max: next_item("hits_per_plane_max")?.parse::<Float>()?,
            shower_gap_max: next_item("shower_gap_max")?.parse::<Float>()?,
            cont_planes_min: next_item("cont_planes_min")?.parse::<u32>()?,
            containment_margin_min: next_item("containment_margin_min")?.parse::<Float>()?,
            nhit_max: next_item("nhit_max")?.parse::<u32>()?,
            track_len_max: next_item("track_len_max")?.parse::<Float>()?,
            remid_pid_max: next_item("remid_pid_max")?.parse::<Float>()?,
            elec_ann_max: next_item("elec_ann_max")?.parse::<Float>()?,
            decaf_numu_cont_pid_min: next_item("decaf_numu_cont_pid_min")?.parse::<Float>()?,
            numu_cont_pid_min: next_item("numu_cont_pid_min")?.parse::<Float>()?,
            part_ptp_max: next_item("part_ptp_max")?.parse::<Float>()?,
            cal_e_per_hit_min: next_item("cal_e_per_hit_min")?.parse::<Float>()?,
            fid_buffer: next_item("fid_buffer")?.parse::<Float>()?,
            track_buffer: next_item("track_buffer")?.parse::<Float>()?,
        };
        let config = Configuration {
            params,
            geometry: Geometry::STANDARD,
        };

        // Display the thresholds so that variation-study logs are
        // self-describing
        config.print();

        // PID-style thresholds only make sense as classifier scores
        for (name, score) in [
            ("remid_pid_max", params.remid_pid_max),
            ("elec_ann_max", params.elec_ann_max),
            ("decaf_numu_cont_pid_min", params.decaf_numu_cont_pid_min),
            ("numu_cont_pid_min", params.numu_cont_pid_min),
            ("part_ptp_max", params.part_ptp_max),
        ] {
            ensure!(
                (0. ..=1.).contains(&score),
                "{} must be a classifier score within [0, 1]",
                name
            );
        }

        // A buffer larger than the detector half-width would turn the
        // buffered volumes inside out
        ensure!(
            params.fid_buffer >= 0. && params.track_buffer >= 0.,
            "Inward buffers must not be negative"
        );
        let buffered = config
            .geometry
            .nd
            .full
            .shrunk(params.fid_buffer.max(params.track_buffer));
        ensure!(
            buffered.left < buffered.right
                && buffered.bottom < buffered.top
                && buffered.front < buffered.back,
            "Buffers must leave a non-empty detector volume"
        );

        // If nothing bad occurred, we can now return the configuration
        Ok(config)
    }

    /// Display the configuration
    pub fn print(&self) {
        let p = &self.params;
        println!("hits_per_plane_max      : {}", p.hits_per_plane_max);
        println!("shower_gap_max          : {}", p.shower_gap_max);
        println!("cont_planes_min         : {}", p.cont_planes_min);
        println!("containment_margin_min  : {}", p.containment_margin_min);
        println!("nhit_max                : {}", p.nhit_max);
        println!("track_len_max           : {}", p.track_len_max);
        println!("remid_pid_max           : {}", p.remid_pid_max);
        println!("elec_ann_max            : {}", p.elec_ann_max);
        println!("decaf_numu_cont_pid_min : {}", p.decaf_numu_cont_pid_min);
        println!("numu_cont_pid_min       : {}", p.numu_cont_pid_min);
        println!("part_ptp_max            : {}", p.part_ptp_max);
        println!("cal_e_per_hit_min       : {}", p.cal_e_per_hit_min);
        println!("fid_buffer              : {}", p.fid_buffer);
        println!("track_buffer            : {}", p.track_buffer);
    }
}

impl Default for Configuration {
    /// Documented thresholds and surveyed geometry
    fn default() -> Self {
        Self {
            params: CutParams::default(),
            geometry: Geometry::STANDARD,
        }
    }
}

/// A value from the parameter file, tagged with the struct field which it is
/// supposed to map for error reporting purposes.
struct ConfigItem<'data> {
    name: &'static str,
    data: &'data str,
}
//
impl<'data> ConfigItem<'data> {
    /// Build a config item from a struct field tag and raw iterator data
    fn new(name: &'static str, data: &'data str) -> Self {
        Self { name, data }
    }

    /// Parse this data using Rust's standard parsing logic
    fn parse<T: FromStr>(self) -> Result<T>
    where
        <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
    {
        self.data
            .parse::<T>()
            .map_err(Error::new)
            .context(format!("Could not parse configuration of {}", self.name))
    }
}
