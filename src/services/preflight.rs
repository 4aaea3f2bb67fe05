//! 资源预检 - 业务能力层
//!
//! 启动浏览器之前检查临时目录的可用空间

use std::path::{Path, PathBuf};

use sysinfo::Disks;
use tracing::{debug, error, info, warn};

use crate::error::ResourceError;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// 查询可用磁盘空间的能力
pub trait DiskProbe: Send + Sync {
    /// `path` 所在文件系统的可用字节数
    fn available_bytes(&self, path: &Path) -> Result<u64, ResourceError>;
}

/// 基于 sysinfo 的磁盘查询
///
/// 选取挂载点是 `path` 前缀的最长那个磁盘。`/tmp` 常见为 tmpfs，
/// 依赖 sysinfo 的 `linux-tmpfs` 特性才会出现在磁盘列表里。
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoDiskProbe;

impl DiskProbe for SysinfoDiskProbe {
    fn available_bytes(&self, path: &Path) -> Result<u64, ResourceError> {
        let resolved = path.canonicalize().map_err(|e| ResourceError::ProbeFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let disks = Disks::new_with_refreshed_list();
        let mounts = disks
            .list()
            .iter()
            .map(|disk| (disk.mount_point(), disk.available_space()));

        let (mount_point, available) =
            backing_mount(&resolved, mounts).ok_or_else(|| ResourceError::ProbeFailed {
                path: path.display().to_string(),
                reason: "没有找到对应的挂载点".to_string(),
            })?;
        debug!(
            "{} 位于挂载点 {}",
            resolved.display(),
            mount_point.display()
        );

        Ok(available)
    }
}

/// 承载 `path` 的挂载点：所有前缀匹配中层级最深的那个
fn backing_mount<'a, I>(path: &Path, mounts: I) -> Option<(&'a Path, u64)>
where
    I: IntoIterator<Item = (&'a Path, u64)>,
{
    mounts
        .into_iter()
        .filter(|(mount_point, _)| path.starts_with(mount_point))
        .max_by_key(|(mount_point, _)| mount_point.components().count())
}

/// 资源预检
pub struct ResourcePreflight<D> {
    probe: D,
    scratch_dir: PathBuf,
    min_free_mb: u64,
}

impl<D: DiskProbe> ResourcePreflight<D> {
    pub fn new(probe: D, scratch_dir: impl Into<PathBuf>, min_free_mb: u64) -> Self {
        Self {
            probe,
            scratch_dir: scratch_dir.into(),
            min_free_mb,
        }
    }

    /// 检查可用空间，低于阈值时失败
    ///
    /// # 返回
    /// 返回可用空间 (MB)
    pub fn check(&self) -> Result<f64, ResourceError> {
        let available_bytes = self
            .probe
            .available_bytes(&self.scratch_dir)
            .map_err(|e| {
                warn!("⚠️ 磁盘空间查询失败: {}", e);
                e
            })?;
        let available_mb = available_bytes as f64 / BYTES_PER_MB;
        info!(
            "💾 {} 可用空间: {:.2} MB",
            self.scratch_dir.display(),
            available_mb
        );

        if available_mb < self.min_free_mb as f64 {
            error!("{} 磁盘空间不足", self.scratch_dir.display());
            return Err(ResourceError::InsufficientDisk {
                path: self.scratch_dir.display().to_string(),
                available_mb,
                required_mb: self.min_free_mb,
            });
        }

        Ok(available_mb)
    }
}
