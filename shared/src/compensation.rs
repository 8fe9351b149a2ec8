//! 本地存储补偿
//!
//! 后端缺少对应接口时的临时方案，数据只存在当前浏览器，不做同步：
//! - `DeletedTaskLedger`: 软删除台账（键 `deleted_tasks`），过滤后续拉取的任务
//! - `ReportNotes`: 报告注释（键 `task_report_{id}`），为已报告任务补充说明

use crate::date;
use crate::store::{KeyValueStore, StoreError};
use crate::{DELETED_TASKS_KEY, REPORT_NOTE_PREFIX, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// =========================================================
// 软删除台账 (Deleted Task Ledger)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedTaskRecord {
    pub task_id: i64,
    pub deleted_at: String,
    pub task_name: String,
}

pub struct DeletedTaskLedger<S> {
    store: S,
}

impl<S: KeyValueStore> DeletedTaskLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 读取全部记录；数据损坏时视为空
    pub fn records(&self) -> Vec<DeletedTaskRecord> {
        let Some(raw) = self.store.get(DELETED_TASKS_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("[DeletedTasks] Ignoring malformed ledger: {}", e);
                Vec::new()
            }
        }
    }

    pub fn deleted_ids(&self) -> HashSet<i64> {
        self.records().into_iter().map(|r| r.task_id).collect()
    }

    pub fn contains(&self, task_id: i64) -> bool {
        self.records().iter().any(|r| r.task_id == task_id)
    }

    pub fn record(&self, task: &Task, now: DateTime<Utc>) -> Result<(), StoreError> {
        self.record_many(std::slice::from_ref(task), now).map(|_| ())
    }

    /// 追加多条记录，已存在的 id 跳过；返回新增条数
    pub fn record_many(&self, tasks: &[Task], now: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut records = self.records();
        let mut known: HashSet<i64> = records.iter().map(|r| r.task_id).collect();
        let deleted_at = date::to_iso(now);

        let before = records.len();
        for task in tasks {
            if known.insert(task.id) {
                records.push(DeletedTaskRecord {
                    task_id: task.id,
                    deleted_at: deleted_at.clone(),
                    task_name: task.name.clone(),
                });
            }
        }
        let added = records.len() - before;

        let raw = serde_json::to_string(&records)?;
        if !self.store.set(DELETED_TASKS_KEY, &raw) {
            return Err(StoreError::Write {
                key: DELETED_TASKS_KEY.to_string(),
            });
        }
        log::info!("[DeletedTasks] Recorded {} task(s)", added);
        Ok(added)
    }

    /// 去掉台账中已删除的任务
    pub fn filter(&self, tasks: Vec<Task>) -> Vec<Task> {
        let ids = self.deleted_ids();
        if ids.is_empty() {
            return tasks;
        }
        tasks.into_iter().filter(|t| !ids.contains(&t.id)).collect()
    }
}

// =========================================================
// 报告注释 (Report Notes)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportNote {
    pub description: String,
    pub manager_id: i64,
    pub reported_at: String,
}

pub struct ReportNotes<S> {
    store: S,
}

impl<S: KeyValueStore> ReportNotes<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn key(task_id: i64) -> String {
        format!("{REPORT_NOTE_PREFIX}{task_id}")
    }

    pub fn save(
        &self,
        task_id: i64,
        description: &str,
        manager_id: i64,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let note = ReportNote {
            description: description.trim().to_string(),
            manager_id,
            reported_at: date::to_iso(now),
        };
        let key = Self::key(task_id);
        let raw = serde_json::to_string(&note)?;
        if self.store.set(&key, &raw) {
            Ok(())
        } else {
            Err(StoreError::Write { key })
        }
    }

    pub fn get(&self, task_id: i64) -> Option<ReportNote> {
        let raw = self.store.get(&Self::key(task_id))?;
        match serde_json::from_str(&raw) {
            Ok(note) => Some(note),
            Err(e) => {
                log::warn!("[ReportNotes] Ignoring malformed note for task {}: {}", task_id, e);
                None
            }
        }
    }

    pub fn remove(&self, task_id: i64) -> bool {
        self.store.delete(&Self::key(task_id))
    }

    /// 为任务填充 reportDescription / reportedAt
    pub fn annotate(&self, tasks: &mut [Task]) {
        for task in tasks.iter_mut() {
            if let Some(note) = self.get(task.id) {
                task.report_description = Some(note.description);
                task.reported_at = Some(note.reported_at);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn task(id: i64) -> Task {
        Task {
            id,
            name: format!("Görev {id}"),
            ..Default::default()
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_soft_deleted_tasks_stay_hidden() {
        let store = MemoryStore::new();
        let ledger = DeletedTaskLedger::new(&store);
        ledger.record(&task(2), at()).unwrap();

        let visible = ledger.filter(vec![task(1), task(2), task(3)]);
        let ids: Vec<i64> = visible.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);

        // 重新构造台账，模拟刷新页面
        let reloaded = DeletedTaskLedger::new(&store);
        assert!(reloaded.contains(2));
        let raw = store.get(DELETED_TASKS_KEY).unwrap();
        assert!(raw.contains("\"taskId\":2"));
        assert!(raw.contains("\"deletedAt\":\"2024-03-10T08:00:00.000Z\""));
        assert!(raw.contains("\"taskName\":\"Görev 2\""));
    }

    #[test]
    fn test_record_many_skips_duplicates() {
        let store = MemoryStore::new();
        let ledger = DeletedTaskLedger::new(&store);
        assert_eq!(ledger.record_many(&[task(1), task(2)], at()).unwrap(), 2);
        assert_eq!(ledger.record_many(&[task(2), task(3)], at()).unwrap(), 1);
        assert_eq!(ledger.records().len(), 3);
    }

    #[test]
    fn test_malformed_ledger_is_ignored() {
        let store = MemoryStore::new();
        store.set(DELETED_TASKS_KEY, "{bozuk");
        let ledger = DeletedTaskLedger::new(&store);
        assert!(ledger.records().is_empty());
        assert_eq!(ledger.filter(vec![task(1)]).len(), 1);
    }

    #[test]
    fn test_report_notes_annotate_and_remove() {
        let store = MemoryStore::new();
        let notes = ReportNotes::new(&store);
        notes.save(7, "  Müşteri onayı alındı  ", 4, at()).unwrap();
        assert_eq!(store.keys(), vec!["task_report_7".to_string()]);

        let mut tasks = vec![task(7), task(8)];
        notes.annotate(&mut tasks);
        assert_eq!(
            tasks[0].report_description.as_deref(),
            Some("Müşteri onayı alındı")
        );
        assert_eq!(tasks[0].reported_at.as_deref(), Some("2024-03-10T08:00:00.000Z"));
        assert_eq!(tasks[1].report_description, None);

        notes.remove(7);
        assert!(notes.get(7).is_none());
    }
}
