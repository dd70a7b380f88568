//! Payment-request construction for the buy-button collaborator.
//!
//! Only the construction of the request is in scope for the storefront:
//! presenting the payment sheet and processing the result belong to the
//! external payment provider. The collaborator reads the selected product's
//! price at click time and, on success, sets the address fragment to
//! `#shop-success`.

use serde::Serialize;

use stitchfox_core::ProductRecord;

const DEMO_MERCHANT_ID: &str = "01234567890123456789";
const DEMO_MERCHANT_NAME: &str = "Stitch Fox Demo Shop";

/// Merchant identity included in every payment request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantInfo {
    pub merchant_id: String,
    pub merchant_name: String,
}

impl Default for MerchantInfo {
    fn default() -> Self {
        Self {
            merchant_id: DEMO_MERCHANT_ID.to_string(),
            merchant_name: DEMO_MERCHANT_NAME.to_string(),
        }
    }
}

/// Transaction details for the selected product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    /// Always `FINAL`: the price is known before the sheet opens.
    pub total_price_status: String,
    /// Two-decimal total, e.g. `123.45`.
    pub total_price: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl TransactionInfo {
    /// Build transaction details from the product's price.
    #[must_use]
    pub fn for_product(product: &ProductRecord) -> Self {
        Self {
            total_price_status: "FINAL".to_string(),
            total_price: format!("{:.2}", product.price),
            currency_code: "USD".to_string(),
        }
    }
}

/// A complete request for the payment sheet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub merchant_info: MerchantInfo,
    pub transaction_info: TransactionInfo,
}

impl PaymentRequest {
    /// Build the request the buy button submits for `product`.
    #[must_use]
    pub fn for_product(product: &ProductRecord) -> Self {
        Self {
            merchant_info: MerchantInfo::default(),
            transaction_info: TransactionInfo::for_product(product),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use url::Url;

    use super::*;

    fn product(price: Decimal) -> ProductRecord {
        ProductRecord {
            title: "Classic Crew".to_string(),
            price,
            large_image: Url::parse("https://shop.example/images/tee.jpg").unwrap(),
            description: String::new(),
        }
    }

    #[test]
    fn test_total_price_is_two_decimal() {
        let info = TransactionInfo::for_product(&product(Decimal::new(1999, 2)));
        assert_eq!(info.total_price, "19.99");

        let info = TransactionInfo::for_product(&product(Decimal::new(20, 0)));
        assert_eq!(info.total_price, "20.00");
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = PaymentRequest::for_product(&product(Decimal::new(12345, 2)));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["transactionInfo"]["totalPrice"], "123.45");
        assert_eq!(json["transactionInfo"]["totalPriceStatus"], "FINAL");
        assert_eq!(json["transactionInfo"]["currencyCode"], "USD");
        assert_eq!(json["merchantInfo"]["merchantId"], DEMO_MERCHANT_ID);
    }
}
