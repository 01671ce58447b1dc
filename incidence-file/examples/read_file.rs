use std::{
    fs::File,
    io::BufReader,
    path::PathBuf,
};

use clap::Parser;
use color_eyre::eyre::Error;
use incidence_file::{
    AdjacencyTable,
    PointTable,
};

fn main() -> Result<(), Error> {
    color_eyre::install()?;

    let args = Args::parse();

    let table = AdjacencyTable::from_reader(BufReader::new(File::open(&args.adjacency)?))?;
    println!("{:#?}", table.header());

    if let Some(points) = &args.points {
        let points = PointTable::from_reader(BufReader::new(File::open(points)?))?;
        println!("{} points", points.len());
    }

    let complex = table.into_complex()?;
    for (face, vertices) in complex.face_vertices.iter().enumerate() {
        println!("face {face}: {vertices:?}");
    }
    for (volume, faces) in complex.volume_faces.iter().enumerate() {
        println!("volume {volume}: {faces:?}");
    }

    Ok(())
}

/// Read an adjacency table and print the derived face-vertex relation
#[derive(Debug, Parser)]
struct Args {
    /// Path to adjacency CSV file
    adjacency: PathBuf,

    /// Path to points CSV file
    points: Option<PathBuf>,
}
