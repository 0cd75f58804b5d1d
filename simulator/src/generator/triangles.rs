use alignmentcore::processing::{AngleTriplet, TripletSampler};
use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use std::fs;
use std::path::Path;

/// Samples `triangles` random triangles in the unit disk.
pub fn sample_triplets(triangles: usize, seed: u64) -> Vec<AngleTriplet> {
    let mut rng = StdRng::seed_from_u64(seed);
    TripletSampler::default().sample(triangles, &mut rng)
}

/// Writes triplets as `x,y,z` rows for external plotting.
pub fn write_triplets_csv<P: AsRef<Path>>(
    path: P,
    triplets: &[AngleTriplet],
) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating triplet file {}", path.display()))?;
    for triplet in triplets {
        writer
            .serialize(triplet)
            .with_context(|| format!("writing triplet file {}", path.display()))?;
    }
    writer.flush()?;
    Ok(())
}
