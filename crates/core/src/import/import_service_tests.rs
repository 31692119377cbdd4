#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::errors::{Error, Result, StoreError};
    use crate::import::{ImportError, ImportOptions, ImportReport, ImportService, RowFailure};
    use crate::media::{FetchedMedia, MediaError, MediaFetcher};
    use crate::products::{Product, ProductRepositoryTrait};
    use crate::rows::RawRow;
    use crate::shipping::{ShippingCategory, ShippingRepositoryTrait};
    use crate::taxes::{Calculator, TaxCategory, TaxRate, TaxRepositoryTrait, Zone};
    use crate::taxonomies::{Taxon, Taxonomy, TaxonomyRepositoryTrait};
    use crate::utils::FoundOrCreated;

    // --- Mock ProductRepository ---
    #[derive(Default)]
    struct MockProductRepository {
        products: Mutex<Vec<Product>>,
        fail_saves: Mutex<bool>,
    }

    impl MockProductRepository {
        fn new() -> Self {
            Self::default()
        }

        fn set_fail_saves(&self, fail: bool) {
            *self.fail_saves.lock().unwrap() = fail;
        }
    }

    #[async_trait]
    impl ProductRepositoryTrait for MockProductRepository {
        fn get_product(&self, id: &str) -> Result<Product> {
            self.products
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(format!("product {}", id)).into())
        }

        fn get_by_slug(&self, slug: &str) -> Result<Option<Product>> {
            Ok(self
                .products
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.slug == slug)
                .cloned())
        }

        fn get_products(&self) -> Result<Vec<Product>> {
            Ok(self.products.lock().unwrap().clone())
        }

        async fn find_by_slug_or_create(&self, slug: &str) -> Result<FoundOrCreated<Product>> {
            let mut products = self.products.lock().unwrap();
            if let Some(existing) = products.iter().find(|p| p.slug == slug) {
                return Ok(FoundOrCreated::Found(existing.clone()));
            }
            let product = Product::new(slug);
            products.push(product.clone());
            Ok(FoundOrCreated::Created(product))
        }

        async fn save(&self, product: Product) -> Result<Product> {
            if *self.fail_saves.lock().unwrap() {
                return Err(StoreError::Internal("simulated store rejection".to_string()).into());
            }
            let mut products = self.products.lock().unwrap();
            match products.iter_mut().find(|p| p.id == product.id) {
                Some(existing) => *existing = product.clone(),
                None => products.push(product.clone()),
            }
            Ok(product)
        }
    }

    // --- Mock TaxonomyRepository ---
    #[derive(Default)]
    struct MockTaxonomyRepository {
        taxonomies: Mutex<Vec<Taxonomy>>,
        taxons: Mutex<Vec<Taxon>>,
    }

    impl MockTaxonomyRepository {
        fn new() -> Self {
            Self::default()
        }

        fn taxon_named(&self, name: &str) -> Option<Taxon> {
            self.taxons
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.name == name)
                .cloned()
        }

        fn taxon_count(&self) -> usize {
            self.taxons.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TaxonomyRepositoryTrait for MockTaxonomyRepository {
        fn get_taxonomy_by_name(&self, name: &str) -> Result<Option<Taxonomy>> {
            Ok(self
                .taxonomies
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.name == name)
                .cloned())
        }

        fn get_taxon(&self, id: &str) -> Result<Taxon> {
            self.taxons
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(format!("taxon {}", id)).into())
        }

        fn get_children(&self, parent_id: &str) -> Result<Vec<Taxon>> {
            Ok(self
                .taxons
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.parent_id.as_deref() == Some(parent_id))
                .cloned()
                .collect())
        }

        async fn find_or_create_taxonomy(&self, name: &str) -> Result<Taxonomy> {
            let mut taxonomies = self.taxonomies.lock().unwrap();
            if let Some(existing) = taxonomies.iter().find(|t| t.name == name) {
                return Ok(existing.clone());
            }
            let (taxonomy, root) = Taxonomy::new(name);
            taxonomies.push(taxonomy.clone());
            self.taxons.lock().unwrap().push(root);
            Ok(taxonomy)
        }

        async fn find_or_create_child(
            &self,
            parent_id: &str,
            name: &str,
            taxonomy_id: &str,
        ) -> Result<FoundOrCreated<Taxon>> {
            let mut taxons = self.taxons.lock().unwrap();
            if let Some(existing) = taxons.iter().find(|t| {
                t.parent_id.as_deref() == Some(parent_id)
                    && t.name == name
                    && t.taxonomy_id == taxonomy_id
            }) {
                return Ok(FoundOrCreated::Found(existing.clone()));
            }
            let taxon = Taxon::new_child(taxonomy_id, parent_id, name);
            taxons.push(taxon.clone());
            Ok(FoundOrCreated::Created(taxon))
        }
    }

    // --- Mock TaxRepository ---
    #[derive(Default)]
    struct MockTaxRepository {
        categories: Mutex<Vec<TaxCategory>>,
        rates: Mutex<Vec<TaxRate>>,
        zones: Mutex<Vec<Zone>>,
        calculators: Mutex<Vec<Calculator>>,
    }

    impl MockTaxRepository {
        fn new() -> Self {
            Self::default()
        }

        fn seed_environment(&self) {
            self.zones.lock().unwrap().push(Zone::new("EU"));
            self.calculators
                .lock()
                .unwrap()
                .push(Calculator::new("default-tax"));
        }

        fn category_named(&self, name: &str) -> Option<TaxCategory> {
            self.categories
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.name == name)
                .cloned()
        }

        fn rate_count(&self) -> usize {
            self.rates.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TaxRepositoryTrait for MockTaxRepository {
        fn get_tax_category_by_name(&self, name: &str) -> Result<Option<TaxCategory>> {
            Ok(self.category_named(name))
        }

        fn get_tax_rates(&self, tax_category_id: &str) -> Result<Vec<TaxRate>> {
            Ok(self
                .rates
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.tax_category_id == tax_category_id)
                .cloned()
                .collect())
        }

        fn get_zones(&self) -> Result<Vec<Zone>> {
            Ok(self.zones.lock().unwrap().clone())
        }

        fn get_calculators(&self) -> Result<Vec<Calculator>> {
            Ok(self.calculators.lock().unwrap().clone())
        }

        async fn find_or_create_tax_category(
            &self,
            name: &str,
        ) -> Result<FoundOrCreated<TaxCategory>> {
            let mut categories = self.categories.lock().unwrap();
            if let Some(existing) = categories.iter().find(|c| c.name == name) {
                return Ok(FoundOrCreated::Found(existing.clone()));
            }
            let category = TaxCategory::new(name);
            categories.push(category.clone());
            Ok(FoundOrCreated::Created(category))
        }

        async fn save_tax_category(&self, category: TaxCategory) -> Result<TaxCategory> {
            let mut categories = self.categories.lock().unwrap();
            match categories.iter_mut().find(|c| c.id == category.id) {
                Some(existing) => *existing = category.clone(),
                None => categories.push(category.clone()),
            }
            Ok(category)
        }

        async fn find_or_create_tax_rate(
            &self,
            tax_category_id: &str,
            name: &str,
        ) -> Result<FoundOrCreated<TaxRate>> {
            let mut rates = self.rates.lock().unwrap();
            if let Some(existing) = rates
                .iter()
                .find(|r| r.tax_category_id == tax_category_id && r.name == name)
            {
                return Ok(FoundOrCreated::Found(existing.clone()));
            }
            let rate = TaxRate::new(tax_category_id, name);
            rates.push(rate.clone());
            Ok(FoundOrCreated::Created(rate))
        }

        async fn save_tax_rate(&self, rate: TaxRate) -> Result<TaxRate> {
            let mut rates = self.rates.lock().unwrap();
            match rates.iter_mut().find(|r| r.id == rate.id) {
                Some(existing) => *existing = rate.clone(),
                None => rates.push(rate.clone()),
            }
            Ok(rate)
        }
    }

    // --- Mock ShippingRepository ---
    #[derive(Default)]
    struct MockShippingRepository {
        categories: Mutex<Vec<ShippingCategory>>,
    }

    impl MockShippingRepository {
        fn new() -> Self {
            Self::default()
        }

        fn seed(&self, name: &str) -> ShippingCategory {
            let category = ShippingCategory::new(name);
            self.categories.lock().unwrap().push(category.clone());
            category
        }
    }

    #[async_trait]
    impl ShippingRepositoryTrait for MockShippingRepository {
        fn get_by_name(&self, name: &str) -> Result<Option<ShippingCategory>> {
            Ok(self
                .categories
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.name == name)
                .cloned())
        }

        fn get_first(&self) -> Result<Option<ShippingCategory>> {
            Ok(self.categories.lock().unwrap().first().cloned())
        }

        async fn create(&self, name: &str) -> Result<ShippingCategory> {
            Ok(self.seed(name))
        }
    }

    // --- Stub MediaFetcher ---
    struct StubFetcher {
        fail: bool,
    }

    impl StubFetcher {
        fn ok() -> Self {
            Self { fail: false }
        }

        fn failing() -> Self {
            Self { fail: true }
        }
    }

    #[async_trait]
    impl MediaFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> std::result::Result<FetchedMedia, MediaError> {
            if self.fail {
                return Err(MediaError::FetchFailed {
                    url: url.to_string(),
                    reason: "connection refused".to_string(),
                });
            }
            Ok(FetchedMedia {
                bytes: vec![0xFF, 0xD8, 0xFF],
                content_type: Some("image/jpeg".to_string()),
            })
        }
    }

    // --- Test wiring ---
    struct TestEnv {
        products: Arc<MockProductRepository>,
        taxonomies: Arc<MockTaxonomyRepository>,
        taxes: Arc<MockTaxRepository>,
        shipping: Arc<MockShippingRepository>,
    }

    fn test_options() -> ImportOptions {
        ImportOptions {
            available_on_fallback: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            ..Default::default()
        }
    }

    impl TestEnv {
        fn new() -> Self {
            let env = Self {
                products: Arc::new(MockProductRepository::new()),
                taxonomies: Arc::new(MockTaxonomyRepository::new()),
                taxes: Arc::new(MockTaxRepository::new()),
                shipping: Arc::new(MockShippingRepository::new()),
            };
            env.taxes.seed_environment();
            env.shipping.seed("Default");
            env
        }

        async fn service(&self) -> ImportService {
            self.service_with_fetcher(Arc::new(StubFetcher::ok())).await
        }

        async fn service_with_fetcher(&self, fetcher: Arc<dyn MediaFetcher>) -> ImportService {
            ImportService::new(
                self.products.clone(),
                self.taxonomies.clone(),
                self.taxes.clone(),
                self.shipping.clone(),
                fetcher,
                test_options(),
            )
            .await
            .unwrap()
        }
    }

    fn scenario_row() -> RawRow {
        RawRow::from_pairs([
            ("Product SKU", "X1"),
            ("Slug", "x1"),
            ("Product Name", "Acme – Widget"),
            ("Price", "9,99"),
            ("Category", "Tools>Hand"),
            ("Product Status", "Publish"),
            ("Product Published", "01/01/2024"),
            ("Product ID", "77"),
            ("Excerpt", "A fine widget"),
        ])
    }

    #[tokio::test]
    async fn test_blank_required_field_creates_nothing() {
        let env = TestEnv::new();
        let service = env.service().await;

        let row = RawRow::from_pairs([("Product SKU", ""), ("Slug", "x1")]);
        let err = service.process_row(&row).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Import(ImportError::MissingRequiredField { ref field }) if field == "Product SKU"
        ));
        assert!(env.products.get_products().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scenario_row_end_to_end() {
        let env = TestEnv::new();
        let service = env.service().await;

        let ctx = service.process_row(&scenario_row()).await.unwrap();
        let product = ctx.product.unwrap();

        assert!(ctx.product_created);
        assert_eq!(product.sku, "X1");
        assert_eq!(product.slug, "x1");
        assert_eq!(product.price, dec!(9.99));
        assert_eq!(
            product.available_on,
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert_eq!(product.description.as_deref(), Some("A fine widget"));
        assert_eq!(product.meta_title.as_deref(), Some("Acme – Widget"));
        assert_eq!(product.get_property("woocommerce_id"), Some("77"));

        // Tax: default percent, default flag set.
        let tax_category = env.taxes.category_named("22").unwrap();
        assert_eq!(product.tax_category_id.as_deref(), Some(tax_category.id.as_str()));
        assert_eq!(tax_category.tax_code, 22);
        assert!(tax_category.is_default);

        // Shipping: the seeded "Default" classification.
        let shipping = env.shipping.get_by_name("Default").unwrap().unwrap();
        assert_eq!(product.shipping_category_id.as_deref(), Some(shipping.id.as_str()));

        // Taxons: the path leaf and the brand facet, not the intermediate.
        let hand = env.taxonomies.taxon_named("Hand").unwrap();
        let tools = env.taxonomies.taxon_named("Tools").unwrap();
        let brand = env.taxonomies.taxon_named("Acme").unwrap();
        assert!(product.has_taxon(&hand.id));
        assert!(product.has_taxon(&brand.id));
        assert!(!product.has_taxon(&tools.id));
        assert_eq!(ctx.attached_taxons.len(), 2);
    }

    #[tokio::test]
    async fn test_reimport_is_idempotent() {
        let env = TestEnv::new();
        let service = env.service().await;

        let first = service.process_row(&scenario_row()).await.unwrap();
        let second = service.process_row(&scenario_row()).await.unwrap();

        assert!(first.product_created);
        assert!(!second.product_created);
        assert!(second.attached_taxons.is_empty());

        let products = env.products.get_products().unwrap();
        assert_eq!(products.len(), 1);

        let product = &products[0];
        let reference = first.product.unwrap();
        assert_eq!(product.sku, reference.sku);
        assert_eq!(product.price, reference.price);
        assert_eq!(product.available_on, reference.available_on);
        assert_eq!(product.taxon_ids, reference.taxon_ids);
        assert_eq!(product.properties, reference.properties);
    }

    #[tokio::test]
    async fn test_unpublished_status_clears_availability() {
        let env = TestEnv::new();
        let service = env.service().await;

        let mut row = scenario_row();
        row.insert("Product Status", "Draft");
        let ctx = service.process_row(&row).await.unwrap();

        assert_eq!(ctx.product.unwrap().available_on, None);
    }

    #[tokio::test]
    async fn test_explicit_tax_class_creates_non_default_category() {
        let env = TestEnv::new();
        let service = env.service().await;

        let mut row = scenario_row();
        row.insert("Tax Class", "10");
        service.process_row(&row).await.unwrap();

        let category = env.taxes.category_named("10").unwrap();
        assert_eq!(category.tax_code, 10);
        assert!(!category.is_default);

        let rates = env.taxes.get_tax_rates(&category.id).unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].amount, dec!(0.10));
        assert!(rates[0].zone_id.is_some());
        assert!(rates[0].calculator_id.is_some());
    }

    #[tokio::test]
    async fn test_repeated_tax_percent_does_not_duplicate_records() {
        let env = TestEnv::new();
        let service = env.service().await;

        service.process_row(&scenario_row()).await.unwrap();
        let mut second = scenario_row();
        second.insert("Slug", "x2");
        service.process_row(&second).await.unwrap();

        let categories = env.taxes.categories.lock().unwrap().len();
        assert_eq!(categories, 1);
        assert_eq!(env.taxes.rate_count(), 1);
    }

    #[tokio::test]
    async fn test_alternative_paths_share_intermediate_nodes() {
        let env = TestEnv::new();
        let service = env.service().await;

        let mut row = scenario_row();
        row.insert("Category", "A>B|A>C");
        row.insert("Product Name", "Widget");
        let ctx = service.process_row(&row).await.unwrap();
        let product = ctx.product.unwrap();

        let a = env.taxonomies.taxon_named("A").unwrap();
        let b = env.taxonomies.taxon_named("B").unwrap();
        let c = env.taxonomies.taxon_named("C").unwrap();
        assert_eq!(b.parent_id.as_deref(), Some(a.id.as_str()));
        assert_eq!(c.parent_id.as_deref(), Some(a.id.as_str()));
        assert!(product.has_taxon(&b.id));
        assert!(product.has_taxon(&c.id));
        assert!(!product.has_taxon(&a.id));

        // Re-running attaches nothing new and creates no new nodes.
        let node_count = env.taxonomies.taxon_count();
        let rerun = service.process_row(&row).await.unwrap();
        assert!(rerun.attached_taxons.is_empty());
        assert_eq!(env.taxonomies.taxon_count(), node_count);
    }

    #[tokio::test]
    async fn test_name_without_separator_yields_no_brand() {
        let env = TestEnv::new();
        let service = env.service().await;

        let mut row = scenario_row();
        row.insert("Product Name", "Plain Widget");
        service.process_row(&row).await.unwrap();

        assert!(env.taxonomies.taxon_named("Plain widget").is_none());
        assert!(env.taxonomies.taxon_named("Plain Widget").is_none());
    }

    #[tokio::test]
    async fn test_malformed_path_fails_but_product_write_stands() {
        let env = TestEnv::new();
        let service = env.service().await;

        let mut row = scenario_row();
        row.insert("Category", "A>>B");
        let err = service.process_row(&row).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Import(ImportError::InvalidCategoryPath { .. })
        ));
        // Stage 2 already committed; stage 3 created no nodes at all.
        assert_eq!(env.products.get_products().unwrap().len(), 1);
        assert!(env.taxonomies.taxon_named("A").is_none());
        assert!(env.taxonomies.taxon_named("B").is_none());
    }

    #[tokio::test]
    async fn test_media_attached_with_alt_and_position() {
        let env = TestEnv::new();
        let service = env.service().await;

        let mut row = scenario_row();
        row.insert("Featured Image", "https://cdn.example.com/w.jpg");
        row.insert("Featured Image Alternative Text", "A widget");
        let ctx = service.process_row(&row).await.unwrap();
        let product = ctx.product.unwrap();

        assert_eq!(product.media.len(), 1);
        let asset = &product.media[0];
        assert_eq!(asset.source_url, "https://cdn.example.com/w.jpg");
        assert_eq!(asset.alt.as_deref(), Some("A widget"));
        assert_eq!(asset.position, 0);
        assert_eq!(asset.content_type.as_deref(), Some("image/jpeg"));
        assert!(!asset.bytes.is_empty());
    }

    #[tokio::test]
    async fn test_blank_image_field_is_a_noop() {
        let env = TestEnv::new();
        let service = env
            .service_with_fetcher(Arc::new(StubFetcher::failing()))
            .await;

        // The failing fetcher must never be called for a blank field.
        let ctx = service.process_row(&scenario_row()).await.unwrap();
        assert!(ctx.attached_media.is_none());
        assert!(ctx.product.unwrap().media.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces_and_keeps_earlier_writes() {
        let env = TestEnv::new();
        let service = env
            .service_with_fetcher(Arc::new(StubFetcher::failing()))
            .await;

        let mut row = scenario_row();
        row.insert("Featured Image", "https://cdn.example.com/w.jpg");
        let err = service.process_row(&row).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Import(ImportError::MediaFetchFailure { .. })
        ));
        let products = env.products.get_products().unwrap();
        assert_eq!(products.len(), 1);
        assert!(!products[0].taxon_ids.is_empty());
        assert!(products[0].media.is_empty());
    }

    #[tokio::test]
    async fn test_store_rejection_is_a_persistence_failure() {
        let env = TestEnv::new();
        let service = env.service().await;
        env.products.set_fail_saves(true);

        let err = service.process_row(&scenario_row()).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Import(ImportError::PersistenceFailure { ref slug, .. }) if slug == "x1"
        ));
    }

    #[tokio::test]
    async fn test_missing_default_shipping_falls_back_to_first() {
        let env = TestEnv::new();
        env.shipping.categories.lock().unwrap().clear();
        let fallback = env.shipping.seed("Oversize");
        let service = env.service().await;

        let ctx = service.process_row(&scenario_row()).await.unwrap();

        assert_eq!(
            ctx.product.unwrap().shipping_category_id.as_deref(),
            Some(fallback.id.as_str())
        );
    }

    #[tokio::test]
    async fn test_batch_continues_past_a_failing_row() {
        let env = TestEnv::new();
        let service = env.service().await;

        let mut bad = scenario_row();
        bad.insert("Slug", " ");
        let mut third = scenario_row();
        third.insert("Slug", "x3");
        third.insert("Product SKU", "X3");

        let rows = vec![scenario_row(), bad, third];
        let report = service.import_rows(&rows).await;

        assert_eq!(report.total, 3);
        assert_eq!(report.imported, 2);
        assert_eq!(report.created, 2);
        assert_eq!(report.updated, 0);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].row_number, 2);
        assert!(report.failures[0].error.contains("Slug"));
        assert_eq!(env.products.get_products().unwrap().len(), 2);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = ImportReport {
            total: 1,
            failed: 1,
            failures: vec![RowFailure {
                row_number: 1,
                error: "missing required field 'Slug'".to_string(),
            }],
            ..Default::default()
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["failures"][0]["rowNumber"], 1);
        assert!(json.get("failed").is_some());
    }

    #[tokio::test]
    async fn test_batch_counts_updates_on_reimport() {
        let env = TestEnv::new();
        let service = env.service().await;

        let rows = vec![scenario_row()];
        let first = service.import_rows(&rows).await;
        let second = service.import_rows(&rows).await;

        assert_eq!(first.created, 1);
        assert_eq!(second.created, 0);
        assert_eq!(second.updated, 1);
    }
}
