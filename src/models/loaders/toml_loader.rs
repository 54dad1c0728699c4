use crate::error::{AppError, FileError};
use crate::models::idea::Idea;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 一个 TOML 文件描述的一批创意
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdeaBatch {
    #[serde(default)]
    pub ideas: Vec<Idea>,
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub round: Option<i64>,
    #[serde(skip)]
    pub file_path: Option<String>,
}

/// 从 TOML 文件加载一批创意
pub async fn load_idea_batch(toml_file_path: &Path) -> Result<IdeaBatch> {
    let path = toml_file_path.to_string_lossy().to_string();
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path, e))?;

    let mut batch: IdeaBatch =
        toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
            path: path.clone(),
            source,
        })?;

    batch.file_path = Some(path);

    Ok(batch)
}

/// 从文件夹中加载所有创意批次（按文件名排序，解析失败的文件跳过）
pub async fn load_all_idea_batches(folder_path: &str) -> Result<Vec<IdeaBatch>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut batches = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_idea_batch(&path).await {
            Ok(batch) => {
                tracing::info!("成功加载 {} 个创意", batch.ideas.len());
                batches.push(batch);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(batches)
}
