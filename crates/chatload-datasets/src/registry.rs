/// Metadata for a normalizer available to callers picking a dataset by name.
pub struct DatasetMetadata {
    pub name: &'static str,
    pub description: &'static str,
}

pub const DATASETS: &[DatasetMetadata] = &[
    DatasetMetadata { name: "oasst1", description: "OpenAssistant Conversations Dataset (OASST1)" },
    DatasetMetadata { name: "convai2", description: "ConvAI2 persona-chat dialogues" },
    DatasetMetadata { name: "dolly", description: "Databricks' Dolly 15k instruction corpus" },
    DatasetMetadata { name: "openorca", description: "OpenOrca instruction-following corpus" },
];

pub fn dataset_names() -> Vec<&'static str> {
    DATASETS.iter().map(|d| d.name).collect()
}

pub fn dataset_metadata(name: &str) -> Option<&'static DatasetMetadata> {
    DATASETS.iter().find(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_normalizer_is_registered() {
        for name in ["oasst1", "convai2", "dolly", "openorca"] {
            assert!(dataset_metadata(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn unknown_dataset_is_none() {
        assert!(dataset_metadata("not-a-real-dataset").is_none());
    }
}
