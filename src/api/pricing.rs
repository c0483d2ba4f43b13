use crate::{
    model::payslip::WorkEntry,
    model::pricing::{Category, PricingTable},
    utils::payslip_calc,
};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[utoipa::path(
    get,
    path = "/api/pricing",
    responses(
        (status = 200, description = "The full pricing table", body = PricingTable)
    ),
    tag = "Pricing"
)]
pub async fn get_pricing(pricing: web::Data<PricingTable>) -> impl Responder {
    HttpResponse::Ok().json(pricing.get_ref())
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResolveQuery {
    /// taklob or lawas
    #[param(value_type = String, example = "taklob")]
    pub category: Category,
    /// Price list within the category; optional for lawas
    #[param(example = "molde")]
    pub subcategory: Option<String>,
    /// Size code or additional-item code
    #[param(example = "S1")]
    pub size: String,
    #[param(example = 10)]
    pub quantity: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    #[schema(value_type = String, example = "taklob")]
    pub category: Category,
    pub subcategory: Option<String>,
    pub size: String,
    pub price: f64,
    pub quantity: u32,
    pub amount: f64,
    /// False when the entry would be zero-priced or have no quantity
    pub valid: bool,
}

/// Resolve a unit price
///
/// Looks the entry up the same way the payslip form does and reports whether
/// it can be added to a payslip.
#[utoipa::path(
    get,
    path = "/api/pricing/resolve",
    params(ResolveQuery),
    responses(
        (status = 200, description = "Resolved price", body = PriceQuote),
        (status = 400, description = "Missing or unknown query parameter")
    ),
    tag = "Pricing"
)]
pub async fn resolve_price(
    pricing: web::Data<PricingTable>,
    query: web::Query<ResolveQuery>,
) -> impl Responder {
    let ResolveQuery {
        category,
        subcategory,
        size,
        quantity,
    } = query.into_inner();

    let entry = WorkEntry {
        category,
        price: pricing.resolve(category, subcategory.as_deref(), &size),
        quantity: quantity.unwrap_or(1),
        subcategory,
        size: Some(size),
    };

    HttpResponse::Ok().json(PriceQuote {
        category,
        amount: payslip_calc::round_currency(payslip_calc::line_amount(&entry)),
        valid: entry.is_billable(),
        price: entry.price,
        quantity: entry.quantity,
        subcategory: entry.subcategory,
        size: entry.size.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use crate::test_support::{test_app, test_pool};
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn returns_whole_table() {
        let pool = test_pool().await;
        let app = test_app!(pool);

        let req = test::TestRequest::get().uri("/api/pricing").to_request();
        let table: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(table["taklob"]["molde"]["S1"], 15.0);
        assert_eq!(table["lawas"]["finish"]["M1"], 13.0);
        assert_eq!(table["additional"]["HELPER"], 200.0);
    }

    #[actix_web::test]
    async fn resolves_entries() {
        let pool = test_pool().await;
        let app = test_app!(pool);

        let cases = [
            ("category=taklob&subcategory=molde&size=S1&quantity=10", 15.0, 150.0, true),
            ("category=lawas&size=M1", 13.0, 13.0, true),
            ("category=taklob&size=BUHOS&quantity=2", 25.0, 50.0, true),
            ("category=taklob&subcategory=molde&size=NOPE", 0.0, 0.0, false),
            ("category=lawas&size=M1&quantity=0", 13.0, 0.0, false),
        ];

        for (qs, price, amount, valid) in cases {
            let req = test::TestRequest::get()
                .uri(&format!("/api/pricing/resolve?{qs}"))
                .to_request();
            let quote: Value = test::call_and_read_body_json(&app, req).await;

            assert_eq!(quote["price"], price, "{qs}");
            assert_eq!(quote["amount"], amount, "{qs}");
            assert_eq!(quote["valid"], valid, "{qs}");
        }
    }

    #[actix_web::test]
    async fn unknown_category_is_bad_request() {
        let pool = test_pool().await;
        let app = test_app!(pool);

        let req = test::TestRequest::get()
            .uri("/api/pricing/resolve?category=both&size=S1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let err: Value = test::read_body_json(resp).await;
        assert!(err["error"].is_string());
    }
}
