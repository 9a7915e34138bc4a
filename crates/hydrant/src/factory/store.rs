use crate::{procedure::ProcedureArtifact, Result};
use hydrant_core::{schema::ClassName, Error};

use std::{
    fs,
    path::{Path, PathBuf},
};

/// Generated procedures persisted as one JSON file per class.
#[derive(Debug)]
pub(crate) struct ProcedureStore {
    dir: PathBuf,
}

impl ProcedureStore {
    pub(crate) fn new(root: &Path, namespace: &str) -> Self {
        let mut dir = root.to_path_buf();
        for part in namespace.split(['\\', '/', ':']).filter(|part| !part.is_empty()) {
            dir.push(part);
        }
        Self { dir }
    }

    pub(crate) fn path(&self, class: &ClassName) -> PathBuf {
        self.dir.join(format!("{}Hydrator.json", class.flattened()))
    }

    pub(crate) fn create(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|err| Error::procedure_store(self.dir.display().to_string(), err))
    }

    pub(crate) fn write(&self, artifact: &ProcedureArtifact) -> Result<PathBuf> {
        let path = self.path(&ClassName::new(&artifact.class));

        let contents = serde_json::to_vec_pretty(artifact)
            .map_err(|err| Error::procedure_store(path.display().to_string(), err))?;

        fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(&path, contents))
            .map_err(|err| Error::procedure_store(path.display().to_string(), err))?;

        Ok(path)
    }

    pub(crate) fn read(&self, class: &ClassName) -> Result<ProcedureArtifact> {
        let path = self.path(class);

        let contents = fs::read(&path)
            .map_err(|err| Error::procedure_store(path.display().to_string(), err))?;

        serde_json::from_slice(&contents)
            .map_err(|err| Error::procedure_store(path.display().to_string(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_path_flattens_class_name() {
        let store = ProcedureStore::new(Path::new("/cache"), "App\\Hydrators");
        let path = store.path(&ClassName::new("App::Document::Post"));

        assert_eq!(path, Path::new("/cache/App/Hydrators/AppDocumentPostHydrator.json"));
    }
}
