//! In-memory host and recording view for shell scenario tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Local;
use dine_client::dashboard::render_dashboard;
use dine_client::{ClientError, ClientResult, DashboardApi, DashboardContext, DashboardView};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct FakeTable {
    table_id: u32,
    status: &'static str,
    order_state: &'static str,
    order_id: u32,
    items: Vec<(String, u32, u32)>,
    payment_method: Option<String>,
}

impl FakeTable {
    fn idle(table_id: u32) -> Self {
        Self {
            table_id,
            status: "idle",
            order_state: "none",
            order_id: 0,
            items: Vec::new(),
            payment_method: None,
        }
    }

    /// Drop the order, leaving `order_state` at the marker the firmware writes
    fn clear_order(&mut self, order_state: &'static str) {
        self.order_state = order_state;
        self.order_id = 0;
        self.items.clear();
        self.payment_method = None;
    }

    fn to_json(&self) -> Value {
        let items: Vec<Value> = self
            .items
            .iter()
            .map(|(name, qty, price)| json!({"name": name, "qty": qty, "price": price}))
            .collect();
        let total: u32 = self.items.iter().map(|(_, qty, price)| qty * price).sum();
        json!({
            "table_id": self.table_id,
            "status": self.status,
            "order_state": self.order_state,
            "order_id": self.order_id,
            "items": items,
            "total": total,
            "payment_method": self.payment_method,
        })
    }
}

#[derive(Debug, Default)]
struct HostState {
    tables: Vec<FakeTable>,
    extra: Vec<Value>,
    calls: Vec<String>,
    fetches: usize,
    fetch_delays: VecDeque<Duration>,
    offline: bool,
    reject_next: Option<String>,
}

/// Host double applying the firmware's table transitions and markers
///
/// Like the firmware it reports `order_state` as `prepared` from food
/// prepared until payment is verified, and `declined` after a decline.
#[derive(Debug, Default)]
pub struct FakeHost {
    state: Mutex<HostState>,
}

impl FakeHost {
    pub fn with_tables(count: u32) -> Arc<Self> {
        let host = Self::default();
        host.state.lock().unwrap().tables = (1..=count).map(FakeTable::idle).collect();
        Arc::new(host)
    }

    /// Customer places an order from the table
    ///
    /// A declined table takes a new order the same way.
    pub fn place_order(&self, table_id: u32, order_id: u32, items: &[(&str, u32, u32)]) {
        self.with_table(table_id, |t| {
            t.order_state = "pending";
            t.order_id = order_id;
            t.items = items
                .iter()
                .map(|(name, qty, price)| (name.to_string(), *qty, *price))
                .collect();
        });
    }

    /// Customer picks a payment method on a billed table
    pub fn choose_payment(&self, table_id: u32, method: &str) {
        self.with_table(table_id, |t| {
            t.status = "payment";
            t.payment_method = Some(method.to_string());
        });
    }

    /// Append a raw element to every table list response
    pub fn push_raw(&self, value: Value) {
        self.state.lock().unwrap().extra.push(value);
    }

    /// Delay applied to upcoming fetches, in call order
    pub fn delay_fetches(&self, delays: &[Duration]) {
        self.state.lock().unwrap().fetch_delays = delays.iter().copied().collect();
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    pub fn reject_next_action(&self, message: &str) {
        self.state.lock().unwrap().reject_next = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn fetches(&self) -> usize {
        self.state.lock().unwrap().fetches
    }

    pub fn status_of(&self, table_id: u32) -> (&'static str, &'static str) {
        let state = self.state.lock().unwrap();
        let table = state
            .tables
            .iter()
            .find(|t| t.table_id == table_id)
            .unwrap();
        (table.status, table.order_state)
    }

    fn with_table(&self, table_id: u32, f: impl FnOnce(&mut FakeTable)) {
        let mut state = self.state.lock().unwrap();
        let table = state
            .tables
            .iter_mut()
            .find(|t| t.table_id == table_id)
            .unwrap();
        f(table);
    }

    /// Record an action call and apply `transition` to the matching table
    fn act(
        &self,
        call: String,
        find: impl Fn(&FakeTable) -> bool,
        transition: impl FnOnce(&mut FakeTable) -> bool,
    ) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);

        if state.offline {
            return Err(ClientError::InvalidResponse("host unreachable".into()));
        }
        if let Some(message) = state.reject_next.take() {
            return Err(ClientError::ActionRejected {
                status: 500,
                message,
            });
        }

        let applied = state
            .tables
            .iter_mut()
            .find(|t| find(t))
            .map(transition)
            .unwrap_or(false);
        if applied {
            Ok(())
        } else {
            Err(ClientError::ActionRejected {
                status: 400,
                message: "Invalid state".into(),
            })
        }
    }
}

#[async_trait]
impl DashboardApi for FakeHost {
    async fn fetch_tables(&self) -> ClientResult<Vec<Value>> {
        // the response reflects the state at request time, however late it lands
        let (result, delay) = {
            let mut state = self.state.lock().unwrap();
            state.fetches += 1;
            let delay = state.fetch_delays.pop_front().unwrap_or_default();
            let result = if state.offline {
                Err(ClientError::HostStatus {
                    status: 503,
                    message: "offline".into(),
                })
            } else {
                let mut tables: Vec<Value> = state.tables.iter().map(FakeTable::to_json).collect();
                tables.extend(state.extra.iter().cloned());
                Ok(tables)
            };
            (result, delay)
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn accept_order(&self, order_id: u32) -> ClientResult<()> {
        self.act(
            format!("accept {order_id}"),
            |t| t.order_id == order_id,
            |t| {
                if t.order_state != "pending" {
                    return false;
                }
                t.order_state = "accepted";
                t.status = "cooking";
                true
            },
        )
    }

    async fn decline_order(&self, order_id: u32) -> ClientResult<()> {
        self.act(
            format!("decline {order_id}"),
            |t| t.order_id == order_id,
            |t| {
                if t.order_state != "pending" {
                    return false;
                }
                t.clear_order("declined");
                true
            },
        )
    }

    async fn mark_food_prepared(&self, order_id: u32) -> ClientResult<()> {
        self.act(
            format!("prepared {order_id}"),
            |t| t.order_id == order_id,
            |t| {
                if t.status != "cooking" {
                    return false;
                }
                t.status = "prepared";
                t.order_state = "prepared";
                true
            },
        )
    }

    async fn generate_bill(&self, table_id: u32) -> ClientResult<()> {
        self.act(
            format!("bill {table_id}"),
            |t| t.table_id == table_id,
            |t| {
                if t.status != "prepared" {
                    return false;
                }
                t.status = "billing";
                true
            },
        )
    }

    async fn verify_payment(&self, table_id: u32) -> ClientResult<()> {
        self.act(
            format!("verify {table_id}"),
            |t| t.table_id == table_id,
            |t| {
                if t.status != "payment" {
                    return false;
                }
                t.status = "idle";
                t.clear_order("none");
                true
            },
        )
    }
}

/// Keeps every frame and notice the shell produces
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    frames: Arc<Mutex<Vec<String>>>,
    notes: Arc<Mutex<Vec<String>>>,
}

impl RecordingView {
    pub fn last_frame(&self) -> String {
        self.frames.lock().unwrap().last().cloned().unwrap_or_default()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    pub fn notes(&self) -> Vec<String> {
        self.notes.lock().unwrap().clone()
    }

    pub fn has_note(&self, needle: &str) -> bool {
        self.notes.lock().unwrap().iter().any(|n| n.contains(needle))
    }
}

impl DashboardView for RecordingView {
    fn refresh(&mut self, ctx: &DashboardContext) {
        self.frames
            .lock()
            .unwrap()
            .push(render_dashboard(ctx, Local::now()));
    }

    fn notify(&mut self, message: &str) {
        self.notes.lock().unwrap().push(message.to_string());
    }
}

/// Poll `check` until it holds or three seconds pass
pub async fn eventually(what: &str, mut check: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(3);
    while !check() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
