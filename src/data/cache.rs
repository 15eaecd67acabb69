use std::path::Path;
use std::sync::{Arc, OnceLock};

use anyhow::Result;

use super::loader::load_file;
use super::model::AccidentDataset;

/// Load-once holder for the base table.
///
/// The first successful load wins; later calls return the same `Arc`
/// without touching the filesystem, whatever path they pass.
#[derive(Debug, Default)]
pub struct DatasetCache {
    cell: OnceLock<Arc<AccidentDataset>>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        DatasetCache {
            cell: OnceLock::new(),
        }
    }

    pub fn get_or_load(&self, path: &Path) -> Result<Arc<AccidentDataset>> {
        if let Some(ds) = self.cell.get() {
            log::debug!("Reusing cached dataset ({} records)", ds.len());
            return Ok(Arc::clone(ds));
        }
        let loaded = Arc::new(load_file(path)?);
        Ok(Arc::clone(self.cell.get_or_init(|| loaded)))
    }
}

static SHARED: DatasetCache = DatasetCache::new();

/// Process-wide cache used by the binary.
pub fn shared_cache() -> &'static DatasetCache {
    &SHARED
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn one_row_csv() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(
            file,
            "gravite accident,motif deplacement,age,sexe,heure,jour,num_jour,num_mois,annee,departement,lat,lon,conditions atmosperiques,existence securite,manoeuvre avant accident"
        )
        .unwrap();
        writeln!(
            file,
            "Indemne,Loisirs,30,M,10,lundi,1,1,2010,75,48.85,2.35,Normale,Oui,Arrêté"
        )
        .unwrap();
        file
    }

    #[test]
    fn second_load_reuses_the_first_table() {
        let file = one_row_csv();

        let cache = DatasetCache::new();
        let first = cache.get_or_load(file.path()).unwrap();
        drop(file);
        // The file is gone; only the cache can answer now.
        let second = cache.get_or_load(Path::new("/nonexistent/clean.csv")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn failed_load_leaves_cache_empty() {
        let cache = DatasetCache::new();
        assert!(cache.get_or_load(Path::new("/nonexistent/clean.csv")).is_err());
        // Nothing was cached, so a later valid path still loads.
        let file = one_row_csv();
        assert_eq!(cache.get_or_load(file.path()).unwrap().len(), 1);
    }
}
