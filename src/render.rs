use crate::api::{Customer, FcSite, ResponseModel};

/// Rows of the customer table shown under a result.
pub const CUSTOMER_PREVIEW_ROWS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapView<'a> {
    /// Base64 PNG as returned by the service.
    Image(&'a str),
    Placeholder,
}

impl MapView<'_> {
    pub fn data_uri(&self) -> Option<String> {
        match self {
            MapView::Image(b64) => Some(format!("data:image/png;base64,{}", b64)),
            MapView::Placeholder => None,
        }
    }
}

/// Read-only view of a successful response, ready for the tables.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel<'a> {
    pub total_cost: String,
    pub selected_fcs: &'a [FcSite],
    pub all_fc_candidates: &'a [FcSite],
    pub customers: &'a [Customer],
    pub customers_total: usize,
    pub map: MapView<'a>,
}

impl<'a> DisplayModel<'a> {
    pub fn project(resp: &'a ResponseModel) -> Self {
        let shown = resp.customers.len().min(CUSTOMER_PREVIEW_ROWS);
        let map = match resp.map_base64.as_deref() {
            Some(b64) if !b64.is_empty() => MapView::Image(b64),
            _ => MapView::Placeholder,
        };

        Self {
            total_cost: resp.total_cost.to_string(),
            selected_fcs: &resp.selected_fcs,
            all_fc_candidates: &resp.all_fc_candidates,
            customers: &resp.customers[..shown],
            customers_total: resp.customers.len(),
            map,
        }
    }

    pub fn selected_label(&self) -> String {
        format!("Selected FCs ({})", self.selected_fcs.len())
    }

    pub fn candidates_label(&self) -> String {
        format!("All FC candidates ({})", self.all_fc_candidates.len())
    }

    /// Reports the visible slice and the full count.
    pub fn customer_label(&self) -> String {
        format!(
            "Customers (first {} of {})",
            self.customers.len(),
            self.customers_total
        )
    }
}
