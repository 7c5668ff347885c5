//! # Quote Aggregator
//!
//! Orchestrates one rate request from order to shipping options.
//!
//! A run validates the request, measures and normalizes the order once,
//! fetches the service catalog for the destination country and then, for
//! every catalog entry the merchant selected, fetches the service detail,
//! plans the parcels, requests the rate and converts it into the store's
//! currency. Services are quoted with bounded concurrency; options and
//! per-service errors keep catalog order.
//!
//! ```text
//! Validate ── Normalize ── FetchCatalog ──┬── Service 1: Detail ─ Plan ─ Quote ─ Convert
//!                                         ├── Service 2: ...
//!                                         └── Finalize
//! ```
//!
//! Validation, normalization, catalog and currency failures end the run
//! with a single error. A failing detail, plan or quote only skips its
//! service; those errors are logged and surface in the response only when
//! no option at all was produced.

use crate::application::error::{QuoteError, QuotingResult};
use crate::application::services::request_builder::{AccountContext, QuoteRequestBuilder};
use crate::application::services::retry::{call_carrier, with_deadline};
use crate::application::services::unit_normalizer::{StoreMeasurements, UnitNormalizer};
use crate::domain::entities::{
    NormalizedParcel, RateResponse, ServiceDescriptor, ShippingOption, ShippingRequest,
    ValidatedRequest,
};
use crate::domain::services::ParcelPlanner;
use crate::infrastructure::carrier::{CarrierCredentials, CarrierGateway};
use crate::infrastructure::config::CarrierSettings;
use crate::infrastructure::conversion::{CurrencyConverter, MeasureConverter, ShipmentMeasurer};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Options and skipped-service errors of a run that was not aborted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationOutcome {
    /// Shipping options in catalog order.
    pub options: Vec<ShippingOption>,
    /// Errors of skipped services, in catalog order.
    pub service_errors: Vec<QuoteError>,
    /// Selected services offered by the catalog.
    pub services_attempted: usize,
}

impl AggregationOutcome {
    /// All service errors joined with `"; "`, if any.
    #[must_use]
    pub fn combined_errors(&self) -> Option<String> {
        if self.service_errors.is_empty() {
            return None;
        }
        Some(
            self.service_errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Builds the caller-facing response.
    ///
    /// Service errors are only attached when no option was produced.
    #[must_use]
    pub fn into_response(self) -> RateResponse {
        let combined = if self.options.is_empty() {
            self.combined_errors()
        } else {
            None
        };
        let mut response = RateResponse::new();
        for option in self.options {
            response.add_option(option);
        }
        if let Some(combined) = combined {
            response.add_error(combined);
        }
        response
    }
}

/// Per-run state shared by the service quotes.
struct RunContext<'a> {
    request: ValidatedRequest<'a>,
    parcel: NormalizedParcel,
    settings: &'a CarrierSettings,
    credentials: CarrierCredentials,
    account: AccountContext,
    builder: QuoteRequestBuilder,
}

/// Produces shipping options for a shipping request.
#[derive(Debug, Clone)]
pub struct QuoteAggregator {
    gateway: Arc<dyn CarrierGateway>,
    measure_converter: Arc<dyn MeasureConverter>,
    currency_converter: Arc<dyn CurrencyConverter>,
    measurer: Arc<dyn ShipmentMeasurer>,
    planner: ParcelPlanner,
}

impl QuoteAggregator {
    /// Creates an aggregator over its collaborators.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn CarrierGateway>,
        measure_converter: Arc<dyn MeasureConverter>,
        currency_converter: Arc<dyn CurrencyConverter>,
        measurer: Arc<dyn ShipmentMeasurer>,
    ) -> Self {
        Self {
            gateway,
            measure_converter,
            currency_converter,
            measurer,
            planner: ParcelPlanner::new(),
        }
    }

    /// Computes the rate response for a request. Never fails: fatal errors
    /// become a response carrying that error.
    pub async fn aggregate(
        &self,
        request: &ShippingRequest,
        settings: &CarrierSettings,
    ) -> RateResponse {
        match self.collect(request, settings).await {
            Ok(outcome) => {
                if let Some(combined) = outcome.combined_errors() {
                    if outcome.options.is_empty() {
                        error!(
                            failed = outcome.service_errors.len(),
                            errors = %combined,
                            "no service could be quoted"
                        );
                    } else {
                        warn!(
                            failed = outcome.service_errors.len(),
                            quoted = outcome.options.len(),
                            errors = %combined,
                            "some services could not be quoted"
                        );
                    }
                }
                info!(
                    options = outcome.options.len(),
                    services = outcome.services_attempted,
                    "rate request completed"
                );
                outcome.into_response()
            }
            Err(err @ QuoteError::InputValidation(_)) => {
                warn!(error = %err, "shipping request rejected");
                RateResponse::failure(err.to_string())
            }
            Err(err) => {
                error!(error = %err, "rate request failed");
                RateResponse::failure(err.to_string())
            }
        }
    }

    /// Runs the quoting flow and returns options with per-service errors.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error: `InputValidation`, `InvalidParcel`,
    /// `Conversion` or `CatalogUnavailable`.
    pub async fn collect(
        &self,
        request: &ShippingRequest,
        settings: &CarrierSettings,
    ) -> QuotingResult<AggregationOutcome> {
        let validated = request.validate()?;

        let measurements = StoreMeasurements {
            weight: self.measurer.total_weight(validated.items, true),
            weight_unit: settings.weight_unit.clone(),
            sides: self.measurer.bounding_dimensions(validated.items),
            dimension_unit: settings.dimension_unit.clone(),
        };
        let parcel = UnitNormalizer::new(Arc::clone(&self.measure_converter), settings.call_policy)
            .normalize(&measurements)
            .await?;
        debug!(%parcel, "order normalized");

        let ctx = RunContext {
            request: validated,
            parcel,
            settings,
            credentials: settings.credentials(),
            account: AccountContext::from_settings(settings),
            builder: QuoteRequestBuilder::from_settings(settings),
        };

        let catalog = self.fetch_catalog(&ctx).await?;
        let eligible: Vec<&ServiceDescriptor> = catalog
            .iter()
            .filter(|service| settings.is_selected(&service.code))
            .collect();
        info!(
            country = %validated.country,
            offered = catalog.len(),
            eligible = eligible.len(),
            "service catalog fetched"
        );

        let results: Vec<QuotingResult<Vec<ShippingOption>>> = stream::iter(eligible.iter())
            .map(|service| self.quote_service(service, &ctx))
            .buffered(settings.call_policy.max_concurrent_services.max(1))
            .collect()
            .await;

        let mut outcome = AggregationOutcome {
            services_attempted: eligible.len(),
            ..AggregationOutcome::default()
        };
        for result in results {
            match result {
                Ok(options) => outcome.options.extend(options),
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    debug!(error = %err, "service skipped");
                    outcome.service_errors.push(err);
                }
            }
        }
        Ok(outcome)
    }

    async fn fetch_catalog(&self, ctx: &RunContext<'_>) -> QuotingResult<Vec<ServiceDescriptor>> {
        let gateway = self.gateway.as_ref();
        let country = ctx.request.country;
        let credentials = &ctx.credentials;
        let use_sandbox = ctx.settings.use_sandbox;
        call_carrier(&ctx.settings.call_policy, "service catalog", move || {
            gateway.fetch_service_catalog(country, credentials, use_sandbox)
        })
        .await
        .map_err(QuoteError::CatalogUnavailable)
    }

    async fn quote_service(
        &self,
        service: &ServiceDescriptor,
        ctx: &RunContext<'_>,
    ) -> QuotingResult<Vec<ShippingOption>> {
        let policy = &ctx.settings.call_policy;
        let gateway = self.gateway.as_ref();
        let credentials = &ctx.credentials;
        let use_sandbox = ctx.settings.use_sandbox;

        let detail_ref = service.detail_ref.as_str();
        let detail = call_carrier(policy, "service detail", move || {
            gateway.fetch_service_detail(credentials, detail_ref)
        })
        .await
        .map_err(|e| QuoteError::detail_unavailable(service.code.clone(), e))?;

        let plan = self
            .planner
            .plan(&ctx.parcel, &detail.restrictions)
            .map_err(|e| QuoteError::planning_failed(service.code.clone(), e))?;
        debug!(
            service = %service.code,
            parcels = plan.parcel_count(),
            binding = ?plan.binding_constraint(),
            %plan,
            "parcels planned"
        );

        let request = ctx.builder.build(
            ctx.request.origin_postal_code,
            ctx.request.country,
            ctx.request.postal_code,
            &plan,
            service,
            &ctx.account,
        );
        let rate_request = &request;
        let quotes = call_carrier(policy, "rate quote", move || {
            gateway.fetch_rate_quotes(rate_request, credentials, use_sandbox)
        })
        .await
        .map_err(|e| QuoteError::quote_unavailable(service.code.clone(), e))?;

        let mut options = Vec::with_capacity(quotes.len());
        for quote in quotes {
            let rate = with_deadline(
                policy,
                "currency conversion",
                self.currency_converter.to_base_currency(quote.rate()),
            )
            .await?;
            let total = rate
                .times(plan.parcel_count())
                .map_err(|e| QuoteError::planning_failed(service.code.clone(), e.into()))?;
            options.push(ShippingOption {
                name: quote.service_name().to_string(),
                rate: total,
                description: describe(quote.delivery_estimate(), plan.parcel_count()),
            });
        }
        Ok(options)
    }
}

/// The delivery estimate, annotated with the parcel count when split.
fn describe(estimate: Option<&str>, parcel_count: u32) -> Option<String> {
    let estimate = estimate.map(str::trim).filter(|e| !e.is_empty());
    match (estimate, parcel_count) {
        (estimate, 0 | 1) => estimate.map(str::to_string),
        (Some(estimate), n) => Some(format!("{estimate} ({n} parcels)")),
        (None, n) => Some(format!("{n} parcels")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        Destination, OrderItem, QuoteResult, QuoteType, RateRequest, RequestValidationError,
        RestrictionSet, ServiceDetail, ShippingAddress,
    };
    use crate::domain::value_objects::{
        CountryCode, CurrencyCode, MeasureUnit, Money, PostalCode, ServiceCode,
    };
    use crate::infrastructure::carrier::{CarrierError, CarrierResult, FixtureCarrier};
    use crate::infrastructure::config::CallPolicy;
    use crate::infrastructure::conversion::{
        ConversionError, ItemSumMeasurer, StaticCurrencyConverter, StaticMeasureConverter,
    };
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    fn d(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    fn cad(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2), CurrencyCode::cad())
    }

    fn service(code: &str, name: &str) -> ServiceDescriptor {
        ServiceDescriptor::new(ServiceCode::new(code), name, code)
    }

    fn detail(code: &str, restrictions: RestrictionSet) -> ServiceDetail {
        ServiceDetail::new(ServiceCode::new(code), code, restrictions)
    }

    fn settings(selected: &[&str]) -> CarrierSettings {
        let mut settings = CarrierSettings::new("key");
        settings.selected_services = selected.iter().map(|c| ServiceCode::new(c)).collect();
        settings.dimension_unit = MeasureUnit::new("centimeters");
        settings.call_policy = CallPolicy::default().with_backoff_base_ms(0);
        settings
    }

    fn request_to(country: &str, postal_code: &str) -> ShippingRequest {
        ShippingRequest::new(
            PostalCode::new("K1A 0B1"),
            Some(ShippingAddress::new(
                CountryCode::parse(country).unwrap(),
                PostalCode::new(postal_code),
            )),
        )
        .with_item(OrderItem::new(d(25), 1).with_size(d(120), d(60), d(50)))
    }

    fn domestic_request() -> ShippingRequest {
        request_to("CA", "h2x 1y4")
    }

    fn aggregator(gateway: Arc<dyn CarrierGateway>) -> QuoteAggregator {
        QuoteAggregator::new(
            gateway,
            Arc::new(StaticMeasureConverter::standard()),
            Arc::new(StaticCurrencyConverter::new(CurrencyCode::cad())),
            Arc::new(ItemSumMeasurer::new()),
        )
    }

    fn two_service_carrier() -> FixtureCarrier {
        FixtureCarrier::new()
            .with_catalog(
                CountryCode::canada(),
                vec![
                    service("DOM.EP", "Expedited Parcel"),
                    service("DOM.RP", "Regular Parcel"),
                ],
            )
            .with_detail("DOM.EP", detail("DOM.EP", RestrictionSet::unbounded()))
            .with_detail("DOM.RP", detail("DOM.RP", RestrictionSet::unbounded()))
    }

    #[tokio::test]
    async fn domestic_unbounded_service_is_quoted_once() {
        let carrier = Arc::new(
            FixtureCarrier::new()
                .with_catalog(CountryCode::canada(), vec![service("DOM.EP", "Expedited Parcel")])
                .with_detail("DOM.EP", detail("DOM.EP", RestrictionSet::unbounded()))
                .with_quotes(
                    ServiceCode::new("DOM.EP"),
                    vec![
                        QuoteResult::new("Expedited Parcel", cad(1899))
                            .with_delivery_estimate("2 business days"),
                    ],
                ),
        );
        let response = aggregator(carrier.clone())
            .aggregate(&domestic_request(), &settings(&["DOM.EP"]))
            .await;

        assert!(response.errors().is_empty());
        assert_eq!(response.options().len(), 1);
        let option = &response.options()[0];
        assert_eq!(option.name, "Expedited Parcel");
        assert_eq!(option.rate, cad(1899));
        assert_eq!(option.description.as_deref(), Some("2 business days"));

        let sent: Vec<RateRequest> = carrier.rate_requests().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].origin_postal_code, "K1A0B1");
        assert_eq!(
            sent[0].destination,
            Destination::Domestic {
                postal_code: "H2X1Y4".to_string()
            }
        );
        assert_eq!(sent[0].weight_kg, d(25));
        assert_eq!(sent[0].length_cm, d(120));
        assert_eq!(sent[0].quote_type, QuoteType::Counter);
    }

    #[tokio::test]
    async fn weight_limit_doubles_rate_and_annotates_description() {
        let carrier = Arc::new(
            FixtureCarrier::new()
                .with_catalog(CountryCode::canada(), vec![service("DOM.RP", "Regular Parcel")])
                .with_detail(
                    "DOM.RP",
                    detail(
                        "DOM.RP",
                        RestrictionSet::unbounded().with_max_weight_grams(d(20000)),
                    ),
                )
                .with_quotes(
                    ServiceCode::new("DOM.RP"),
                    vec![
                        QuoteResult::new("Regular Parcel", cad(1250))
                            .with_delivery_estimate("5 business days"),
                    ],
                ),
        );
        let outcome = aggregator(carrier.clone())
            .collect(&domestic_request(), &settings(&["DOM.RP"]))
            .await
            .unwrap();

        assert_eq!(outcome.options.len(), 1);
        assert_eq!(outcome.options[0].rate, cad(2500));
        assert_eq!(
            outcome.options[0].description.as_deref(),
            Some("5 business days (2 parcels)")
        );

        let sent = carrier.rate_requests().await;
        assert_eq!(sent[0].weight_kg, Decimal::new(125, 1));
        assert_eq!(
            (sent[0].length_cm, sent[0].width_cm, sent[0].height_cm),
            (d(60), d(30), d(25))
        );
    }

    #[tokio::test]
    async fn one_failing_service_is_skipped_silently() {
        let carrier = Arc::new(
            two_service_carrier()
                .with_quotes(
                    ServiceCode::new("DOM.EP"),
                    vec![QuoteResult::new("Expedited Parcel", cad(1899))],
                )
                .with_quote_error(
                    ServiceCode::new("DOM.RP"),
                    CarrierError::rejected("service not available"),
                ),
        );
        let settings = settings(&["DOM.EP", "DOM.RP"]);
        let aggregator = aggregator(carrier);

        let outcome = aggregator.collect(&domestic_request(), &settings).await.unwrap();
        assert_eq!(outcome.options.len(), 1);
        assert_eq!(outcome.service_errors.len(), 1);
        assert_eq!(
            outcome.service_errors[0].service(),
            Some(&ServiceCode::new("DOM.RP"))
        );

        let response = aggregator.aggregate(&domestic_request(), &settings).await;
        assert_eq!(response.options().len(), 1);
        assert!(response.errors().is_empty());
    }

    #[tokio::test]
    async fn failed_detail_lookup_skips_only_that_service() {
        let carrier = Arc::new(
            FixtureCarrier::new()
                .with_catalog(
                    CountryCode::canada(),
                    vec![
                        service("DOM.EP", "Expedited Parcel"),
                        service("DOM.RP", "Regular Parcel"),
                    ],
                )
                .with_detail("DOM.EP", detail("DOM.EP", RestrictionSet::unbounded()))
                .with_detail_error("DOM.RP", CarrierError::service_not_found("DOM.RP"))
                .with_quotes(
                    ServiceCode::new("DOM.EP"),
                    vec![QuoteResult::new("Expedited Parcel", cad(1899))],
                ),
        );
        let settings = settings(&["DOM.EP", "DOM.RP"]);
        let aggregator = aggregator(carrier.clone());

        let outcome = aggregator.collect(&domestic_request(), &settings).await.unwrap();
        assert_eq!(outcome.options.len(), 1);
        assert_eq!(outcome.options[0].name, "Expedited Parcel");
        assert!(matches!(
            outcome.service_errors.as_slice(),
            [QuoteError::ServiceDetailUnavailable { service, .. }] if service.as_str() == "DOM.RP"
        ));
        assert_eq!(carrier.call_counts().quote, 1);

        let response = aggregator.aggregate(&domestic_request(), &settings).await;
        assert_eq!(response.options().len(), 1);
        assert!(response.errors().is_empty());
    }

    #[tokio::test]
    async fn all_services_failing_surfaces_combined_error() {
        let carrier = Arc::new(
            two_service_carrier()
                .with_quote_error(ServiceCode::new("DOM.EP"), CarrierError::rejected("first"))
                .with_quote_error(ServiceCode::new("DOM.RP"), CarrierError::rejected("second")),
        );
        let response = aggregator(carrier)
            .aggregate(&domestic_request(), &settings(&["DOM.EP", "DOM.RP"]))
            .await;

        assert!(response.is_failure());
        assert_eq!(response.errors().len(), 1);
        assert_eq!(
            response.errors()[0],
            "DOM.EP: carrier rejected request: first; DOM.RP: carrier rejected request: second"
        );
    }

    #[tokio::test]
    async fn missing_items_fail_without_carrier_calls() {
        let carrier = Arc::new(two_service_carrier());
        let request = ShippingRequest::new(
            PostalCode::new("K1A 0B1"),
            Some(ShippingAddress::new(CountryCode::canada(), PostalCode::new("H2X 1Y4"))),
        );
        let response = aggregator(carrier.clone())
            .aggregate(&request, &settings(&["DOM.EP"]))
            .await;

        assert_eq!(response.errors(), ["no shipment items"]);
        assert!(response.options().is_empty());
        assert_eq!(carrier.call_counts().catalog, 0);
    }

    #[tokio::test]
    async fn missing_address_is_reported() {
        let request = ShippingRequest::new(PostalCode::new("K1A 0B1"), None)
            .with_item(OrderItem::new(d(1), 1));
        let err = aggregator(Arc::new(FixtureCarrier::new()))
            .collect(&request, &settings(&[]))
            .await
            .unwrap_err();
        assert_eq!(err, QuoteError::InputValidation(RequestValidationError::NoAddress));
    }

    #[tokio::test]
    async fn catalog_failure_is_fatal() {
        let carrier = Arc::new(
            FixtureCarrier::new()
                .with_catalog_error(CountryCode::canada(), CarrierError::authentication("bad key")),
        );
        let response = aggregator(carrier.clone())
            .aggregate(&domestic_request(), &settings(&["DOM.EP"]))
            .await;

        assert_eq!(response.errors().len(), 1);
        assert!(response.errors()[0].starts_with("service catalog unavailable"));
        assert_eq!(carrier.call_counts().detail, 0);
    }

    #[tokio::test]
    async fn unselected_services_are_not_queried() {
        let carrier = Arc::new(two_service_carrier().with_quotes(
            ServiceCode::new("DOM.RP"),
            vec![QuoteResult::new("Regular Parcel", cad(1250))],
        ));
        let outcome = aggregator(carrier.clone())
            .collect(&domestic_request(), &settings(&["DOM.RP"]))
            .await
            .unwrap();

        assert_eq!(outcome.services_attempted, 1);
        assert_eq!(outcome.options.len(), 1);
        assert_eq!(carrier.call_counts().detail, 1);
        assert_eq!(carrier.call_counts().quote, 1);
    }

    #[tokio::test]
    async fn unknown_currency_is_fatal() {
        let usd = Money::new(d(10), CurrencyCode::parse("USD").unwrap());
        let carrier = Arc::new(two_service_carrier().with_quotes(
            ServiceCode::new("DOM.EP"),
            vec![QuoteResult::new("Expedited Parcel", usd)],
        ));
        let err = aggregator(carrier)
            .collect(&domestic_request(), &settings(&["DOM.EP"]))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            QuoteError::Conversion(ConversionError::currency_unavailable("USD"))
        );
    }

    #[tokio::test]
    async fn rates_are_converted_into_base_currency() {
        let usd = CurrencyCode::parse("USD").unwrap();
        let carrier = Arc::new(two_service_carrier().with_quotes(
            ServiceCode::new("DOM.EP"),
            vec![QuoteResult::new("Expedited Parcel", cad(2500))],
        ));
        let aggregator = QuoteAggregator::new(
            carrier,
            Arc::new(StaticMeasureConverter::standard()),
            Arc::new(
                StaticCurrencyConverter::new(usd.clone())
                    .with_rate(CurrencyCode::cad(), Decimal::new(125, 2)),
            ),
            Arc::new(ItemSumMeasurer::new()),
        );
        let response = aggregator
            .aggregate(&domestic_request(), &settings(&["DOM.EP"]))
            .await;
        assert_eq!(response.options()[0].rate, Money::new(d(20), usd));
    }

    #[tokio::test]
    async fn unknown_store_unit_is_fatal() {
        let carrier = Arc::new(two_service_carrier());
        let mut settings = settings(&["DOM.EP"]);
        settings.weight_unit = MeasureUnit::new("stone");
        let response = aggregator(carrier.clone())
            .aggregate(&domestic_request(), &settings)
            .await;
        assert_eq!(response.errors(), ["measurement unit 'stone' is not available"]);
        assert_eq!(carrier.call_counts().catalog, 0);
    }

    #[tokio::test]
    async fn commercial_account_and_international_destination() {
        let fr = CountryCode::parse("FR").unwrap();
        let carrier = Arc::new(
            FixtureCarrier::new()
                .with_catalog(fr.clone(), vec![service("INT.XP", "Xpresspost International")])
                .with_detail("INT.XP", detail("INT.XP", RestrictionSet::unbounded()))
                .with_quotes(
                    ServiceCode::new("INT.XP"),
                    vec![QuoteResult::new("Xpresspost International", cad(7450))],
                ),
        );
        let mut settings = settings(&["INT.XP"]);
        settings.customer_number = Some("0001234567".to_string());
        settings.contract_id = Some("42708517".to_string());

        let response = aggregator(carrier.clone())
            .aggregate(&request_to("FR", "75001"), &settings)
            .await;
        assert_eq!(response.options().len(), 1);

        let sent = carrier.rate_requests().await;
        assert_eq!(sent[0].destination, Destination::International { country: fr });
        assert_eq!(
            sent[0].quote_type,
            QuoteType::Commercial {
                customer_number: "0001234567".to_string(),
                contract_id: Some("42708517".to_string()),
            }
        );
    }

    /// Delays quotes per service and fails detail lookups a set number of
    /// times before delegating.
    #[derive(Debug)]
    struct ScriptedGateway {
        inner: FixtureCarrier,
        quote_delays_ms: HashMap<ServiceCode, u64>,
        detail_failures: Mutex<u32>,
    }

    #[async_trait]
    impl CarrierGateway for ScriptedGateway {
        async fn fetch_service_catalog(
            &self,
            country: &CountryCode,
            credentials: &CarrierCredentials,
            use_sandbox: bool,
        ) -> CarrierResult<Vec<ServiceDescriptor>> {
            self.inner
                .fetch_service_catalog(country, credentials, use_sandbox)
                .await
        }

        async fn fetch_service_detail(
            &self,
            credentials: &CarrierCredentials,
            detail_ref: &str,
        ) -> CarrierResult<ServiceDetail> {
            {
                let mut failures = self.detail_failures.lock().unwrap();
                if *failures > 0 {
                    *failures -= 1;
                    return Err(CarrierError::connection("connection reset"));
                }
            }
            self.inner.fetch_service_detail(credentials, detail_ref).await
        }

        async fn fetch_rate_quotes(
            &self,
            request: &RateRequest,
            credentials: &CarrierCredentials,
            use_sandbox: bool,
        ) -> CarrierResult<Vec<QuoteResult>> {
            if let Some(delay) = self.quote_delays_ms.get(&request.service_code) {
                tokio::time::sleep(Duration::from_millis(*delay)).await;
            }
            self.inner
                .fetch_rate_quotes(request, credentials, use_sandbox)
                .await
        }
    }

    #[tokio::test]
    async fn concurrent_quotes_keep_catalog_order() {
        let inner = two_service_carrier()
            .with_quotes(
                ServiceCode::new("DOM.EP"),
                vec![QuoteResult::new("Expedited Parcel", cad(1899))],
            )
            .with_quotes(
                ServiceCode::new("DOM.RP"),
                vec![QuoteResult::new("Regular Parcel", cad(1250))],
            );
        let gateway = Arc::new(ScriptedGateway {
            inner,
            quote_delays_ms: HashMap::from([(ServiceCode::new("DOM.EP"), 100)]),
            detail_failures: Mutex::new(0),
        });
        let mut settings = settings(&["DOM.EP", "DOM.RP"]);
        settings.call_policy = settings.call_policy.with_max_concurrent_services(2);

        let response = aggregator(gateway).aggregate(&domestic_request(), &settings).await;
        let names: Vec<&str> = response.options().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Expedited Parcel", "Regular Parcel"]);
    }

    #[tokio::test]
    async fn transient_detail_failures_are_retried() {
        let inner = two_service_carrier().with_quotes(
            ServiceCode::new("DOM.EP"),
            vec![QuoteResult::new("Expedited Parcel", cad(1899))],
        );
        let gateway = Arc::new(ScriptedGateway {
            inner,
            quote_delays_ms: HashMap::new(),
            detail_failures: Mutex::new(2),
        });
        let response = aggregator(gateway)
            .aggregate(&domestic_request(), &settings(&["DOM.EP"]))
            .await;
        assert_eq!(response.options().len(), 1);
        assert!(response.errors().is_empty());
    }

    #[tokio::test]
    async fn exhausted_retries_skip_the_service() {
        let inner = two_service_carrier();
        let gateway = Arc::new(ScriptedGateway {
            inner,
            quote_delays_ms: HashMap::new(),
            detail_failures: Mutex::new(10),
        });
        let outcome = aggregator(gateway)
            .collect(&domestic_request(), &settings(&["DOM.EP"]))
            .await
            .unwrap();
        assert!(outcome.options.is_empty());
        assert!(matches!(
            outcome.service_errors[0],
            QuoteError::ServiceDetailUnavailable { .. }
        ));
        assert!(outcome.service_errors[0].is_retryable());
    }

    #[tokio::test]
    async fn bundled_fixtures_quote_end_to_end() {
        let carrier =
            FixtureCarrier::from_toml_str(include_str!("../../../fixtures/carrier.toml")).unwrap();
        let settings =
            CarrierSettings::from_toml_str(include_str!("../../../fixtures/settings.toml")).unwrap();
        let request: ShippingRequest =
            serde_json::from_str(include_str!("../../../fixtures/request.json")).unwrap();

        let outcome = aggregator(Arc::new(carrier))
            .collect(&request, &settings)
            .await
            .unwrap();

        // 25 kg of rated weight in a 70 x 60 x 40 cm box.
        let rates: Vec<(&str, Money)> = outcome
            .options
            .iter()
            .map(|o| (o.name.as_str(), o.rate.clone()))
            .collect();
        assert_eq!(
            rates,
            [("Regular Parcel", cad(1425)), ("Expedited Parcel", cad(3798))]
        );
        assert_eq!(
            outcome.options[1].description.as_deref(),
            Some("2 business days (2 parcels)")
        );
        assert_eq!(outcome.services_attempted, 3);
        assert!(matches!(
            outcome.service_errors.as_slice(),
            [QuoteError::ServiceDetailUnavailable { .. }]
        ));
    }

    #[test]
    fn description_annotation() {
        assert_eq!(describe(Some("2 days"), 1), Some("2 days".to_string()));
        assert_eq!(describe(Some("2 days"), 3), Some("2 days (3 parcels)".to_string()));
        assert_eq!(describe(None, 2), Some("2 parcels".to_string()));
        assert_eq!(describe(Some("  "), 1), None);
        assert_eq!(describe(None, 1), None);
    }

    #[test]
    fn response_only_carries_errors_without_options() {
        let outcome = AggregationOutcome {
            options: vec![],
            service_errors: vec![QuoteError::quote_unavailable(
                "DOM.EP",
                CarrierError::rejected("x"),
            )],
            services_attempted: 1,
        };
        assert!(outcome.clone().into_response().is_failure());
        assert!(AggregationOutcome::default().into_response().errors().is_empty());
    }
}
