use std::path::PathBuf;

#[derive(Clone, Debug, clap::Parser)]
pub struct Args {
    /// Adjacency CSV file: a row of element counts, then one incidence per
    /// row
    pub adjacency: PathBuf,

    /// Points CSV file: one `x,y,z` row per vertex
    pub points: PathBuf,

    /// Seed for the volume colors. Overrides the seed from the config file.
    #[clap(long)]
    pub seed: Option<u64>,

    #[clap(long)]
    pub ignore_config: bool,
}
