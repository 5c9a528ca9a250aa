//! # PayPal Wire Types
//!
//! JSON shapes exchanged with the PayPal JS SDK, and their conversions to
//! and from the provider-neutral types in `pay-core`.

use pay_core::{Approval, CapturedPayment, OrderIntent, WidgetError, WidgetResult};
use serde::{Deserialize, Serialize};

/// Body passed to `actions.order.create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub purchase_units: Vec<PurchaseUnit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseUnit {
    pub description: String,
    pub amount: PaypalAmount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaypalAmount {
    pub value: String,
    pub currency_code: String,
}

impl From<&OrderIntent> for OrderRequest {
    fn from(intent: &OrderIntent) -> Self {
        Self {
            purchase_units: vec![PurchaseUnit {
                description: intent.description.clone(),
                amount: PaypalAmount {
                    value: intent.amount.value.as_str().to_string(),
                    currency_code: intent.amount.currency.clone(),
                },
            }],
        }
    }
}

/// `data` argument of `onApprove`
#[derive(Debug, Clone, Deserialize)]
pub struct ApproveData {
    #[serde(rename = "orderID")]
    pub order_id: String,
    #[serde(rename = "payerID", default)]
    pub payer_id: Option<String>,
}

impl From<ApproveData> for Approval {
    fn from(data: ApproveData) -> Self {
        Approval {
            order_id: data.order_id,
            payer_id: data.payer_id,
        }
    }
}

/// `data` argument of `onCancel`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelData {
    #[serde(rename = "orderID", default)]
    pub order_id: Option<String>,
}

/// Resolved value of `actions.order.capture()`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaptureResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payer: Option<Payer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Payer {
    #[serde(default)]
    pub name: Option<PayerName>,
    #[serde(default)]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayerName {
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
}

impl CaptureResponse {
    pub fn from_json(value: serde_json::Value) -> WidgetResult<Self> {
        serde_json::from_value(value).map_err(|e| WidgetError::CaptureFailed(e.to_string()))
    }
}

impl From<CaptureResponse> for CapturedPayment {
    fn from(response: CaptureResponse) -> Self {
        CapturedPayment {
            capture_id: response.id,
            status: response.status,
            payer_given_name: response
                .payer
                .and_then(|p| p.name)
                .and_then(|n| n.given_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pay_core::Price;
    use serde_json::json;

    #[test]
    fn test_order_request_shape() {
        let intent = OrderIntent::new("Widget", Price::new("25.00"));
        let request = serde_json::to_value(OrderRequest::from(&intent)).unwrap();

        assert_eq!(
            request,
            json!({
                "purchase_units": [{
                    "description": "Widget",
                    "amount": { "value": "25.00", "currency_code": "USD" }
                }]
            })
        );
    }

    #[test]
    fn test_approve_data() {
        let data: ApproveData =
            serde_json::from_value(json!({ "orderID": "5O190127TN364715T", "payerID": "FSMVU44LF3YUS" }))
                .unwrap();
        let approval = Approval::from(data);

        assert_eq!(approval.order_id, "5O190127TN364715T");
        assert_eq!(approval.payer_id.as_deref(), Some("FSMVU44LF3YUS"));
    }

    #[test]
    fn test_capture_response_to_captured_payment() {
        let response = CaptureResponse::from_json(json!({
            "id": "5O190127TN364715T",
            "status": "COMPLETED",
            "payer": {
                "name": { "given_name": "John", "surname": "Doe" },
                "email_address": "customer@example.com",
                "payer_id": "QYR5Z8XDVJNXQ"
            },
            "purchase_units": []
        }))
        .unwrap();
        let captured = CapturedPayment::from(response);

        assert_eq!(captured.payer_given_name.as_deref(), Some("John"));
        assert_eq!(captured.status.as_deref(), Some("COMPLETED"));
        assert_eq!(captured.capture_id.as_deref(), Some("5O190127TN364715T"));
    }

    #[test]
    fn test_capture_response_without_payer() {
        let captured = CapturedPayment::from(CaptureResponse::from_json(json!({})).unwrap());
        assert!(captured.payer_given_name.is_none());
    }

    #[test]
    fn test_cancel_data_optional_order() {
        let data: CancelData = serde_json::from_value(json!({})).unwrap();
        assert!(data.order_id.is_none());
    }
}
