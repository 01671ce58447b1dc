use color_eyre::eyre::Error;
use rand::{
    SeedableRng,
    rngs::StdRng,
};

use crate::{
    args::Args,
    config::AppConfig,
    files::{
        AppFiles,
        read_adjacency_table,
        read_point_table,
    },
    scene::Scene,
    util::format_path,
    viewer,
};

pub(super) fn run_app(args: Args) -> Result<(), Error> {
    let config: AppConfig = if args.ignore_config {
        Default::default()
    }
    else {
        AppFiles::open()?.read_config_or_create()?
    };

    let adjacency = read_adjacency_table(&args.adjacency)?;
    let points = read_point_table(&args.points)?;
    tracing::info!(
        header = ?adjacency.header(),
        num_points = points.len(),
        "loaded tables"
    );

    let complex = adjacency.into_complex()?;

    let mut rng = match args.seed.or(config.seed) {
        Some(seed) => {
            tracing::debug!(seed, "seeding volume colors");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let scene = Scene::build(&complex, &points, &mut rng, &config.scene)?;
    if scene.is_empty() {
        tracing::warn!("no faces to draw");
    }

    let title = format!("{} - {}", format_path(&args.adjacency), env!("CARGO_PKG_NAME"));
    viewer::show(scene, title, &config.view)?;

    Ok(())
}
