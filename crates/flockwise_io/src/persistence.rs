use crate::error::{IoError, Result};
use flockwise_core::RunSeed;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub fn write_json_file<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| IoError::from(e).with_context(format!("creating {}", path.display())))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

pub fn read_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| IoError::from(e).with_context(format!("opening {}", path.display())))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Saves configuration and initial layout so the run can be replayed.
pub fn save_run_seed(path: impl AsRef<Path>, seed: &RunSeed) -> Result<()> {
    write_json_file(&path, seed)?;
    tracing::info!(
        path = %path.as_ref().display(),
        agents = seed.agents.len(),
        "Run seed saved"
    );
    Ok(())
}

/// Loads a run seed and checks its configuration before returning it.
pub fn load_run_seed(path: impl AsRef<Path>) -> Result<RunSeed> {
    let seed: RunSeed = read_json_file(path)?;
    seed.config.validate()?;
    if seed.agents.len() != seed.config.world.agent_count {
        return Err(IoError::validation(format!(
            "seed lists {} agents, config expects {}",
            seed.agents.len(),
            seed.config.world.agent_count
        )));
    }
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flockwise_core::{Flock, FlockConfig};

    fn seed() -> RunSeed {
        let mut config = FlockConfig::default();
        config.world.agent_count = 8;
        config.world.seed = 21;
        RunSeed::capture(&Flock::new(config).unwrap())
    }

    #[test]
    fn test_saved_seed_replays_the_same_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let original = seed();
        save_run_seed(&path, &original).unwrap();
        let loaded = load_run_seed(&path).unwrap();

        let mut a = original.build().unwrap();
        let mut b = loaded.build().unwrap();
        a.advance(10);
        b.advance(10);
        assert_eq!(a.current_states(), b.current_states());
    }

    #[test]
    fn test_truncated_agent_list_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let mut broken = seed();
        broken.agents.pop();
        write_json_file(&path, &broken).unwrap();
        assert!(matches!(
            load_run_seed(&path),
            Err(IoError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = load_run_seed("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("opening"));
    }
}
