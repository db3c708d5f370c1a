//! # 任务队列（next tick）
//!
//! ## 设计思路
//!
//! 浏览器中的 `setTimeout(fn, 0)` 在这里显式建模为“提交到任务队列”。
//! 延迟执行的顺序因此成为可测试的约定，而不是隐式的定时器行为。
//!
//! ## 实现思路
//!
//! - 内部为 `Arc<Mutex<VecDeque<Task>>>`，句柄可克隆，提交方与执行方共享同一队列。
//! - `run_tick` 只执行 tick 开始时已排队的任务（FIFO）；执行过程中新提交的任务留到下一个 tick。
//! - 执行任务时不持有锁，任务内部可以继续提交。
//! - 单个任务 panic 只记录 error 日志，同一 tick 中其后的任务照常执行。

use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};

/// 队列中的一个待执行任务。
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// 协作式任务队列句柄。
#[derive(Clone, Default)]
pub struct TaskQueue {
    tasks: Arc<Mutex<VecDeque<Task>>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 提交任务，等待下一个 tick 执行。
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.lock().push_back(Box::new(task));
    }

    /// 当前排队中的任务数。
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 执行一个 tick，返回本次执行的任务数。
    pub fn run_tick(&self) -> usize {
        let batch: Vec<Task> = {
            let mut guard = self.lock();
            guard.drain(..).collect()
        };

        let count = batch.len();
        for task in batch {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
                log::error!("❌ 任务执行 panic，已跳过: {}", panic_message(payload.as_ref()));
            }
        }

        if count > 0 {
            log::debug!("⏱️ 任务队列 tick 完成 - 执行 {} 个任务", count);
        }
        count
    }

    /// 持续执行 tick 直到队列为空，返回执行的任务总数。
    pub fn run_until_idle(&self) -> usize {
        let mut total = 0;
        loop {
            let ran = self.run_tick();
            if ran == 0 {
                return total;
            }
            total += ran;
        }
    }

    // 任务在锁外执行，中毒只可能来自 push/drain 本身，数据仍然完整。
    fn lock(&self) -> MutexGuard<'_, VecDeque<Task>> {
        self.tasks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "未知 panic"
    }
}
