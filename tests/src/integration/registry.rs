//! # Registry Warm-up Flows
//!
//! Registers the shop components the way a host application would at
//! startup, then exercises lookup and dynamic invocation on the published
//! registry.

#[cfg(test)]
mod tests {
    use std::any::type_name;
    use std::sync::Arc;
    use std::thread;

    use bean_registry::{
        BeanRegistry, Category, InvocationError, ProxyFactory, RegistryBuilder, RegistryConfig,
        RegistryError, TransactionInterceptor, TransactionJournal, TransactionPhase,
    };
    use serde_json::{json, Map};

    use crate::integration::fixtures::{
        CatalogController, CustomerRepository, PaymentApi, PaymentService, SmtpMailer,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn warm_up(config: RegistryConfig) -> (RegistryBuilder, Arc<TransactionJournal>) {
        let journal = Arc::new(TransactionJournal::new());
        let proxies = ProxyFactory::new(Arc::new(TransactionInterceptor::new(journal.clone())));
        let mut builder = RegistryBuilder::with_proxy_factory(config, proxies);

        builder.register::<PaymentService>(Category::Service).unwrap();
        builder
            .register::<CustomerRepository>(Category::Repository)
            .unwrap();
        builder
            .register::<CatalogController>(Category::Controller)
            .unwrap();
        let _ = builder.register::<SmtpMailer>(Category::Component);

        (builder, journal)
    }

    fn shop_registry() -> (BeanRegistry, Arc<TransactionJournal>) {
        let (builder, journal) = warm_up(RegistryConfig::default());
        (builder.build().expect("lenient build publishes"), journal)
    }

    // =============================================================================
    // LOOKUP
    // =============================================================================

    #[test]
    fn test_lookup_by_derived_name() {
        let (registry, _) = shop_registry();

        let mut names: Vec<_> = registry.names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec!["catalogController", "customerRepository", "paymentService"]
        );

        let payments = registry.get("paymentService").unwrap();
        assert_eq!(payments.category(), Category::Service);
        assert!(payments.is_intercepted());
        assert!(!registry.get("catalogController").unwrap().is_intercepted());
    }

    #[test]
    fn test_lookup_by_qualified_name() {
        let (registry, _) = shop_registry();

        let by_type = registry.get(type_name::<CustomerRepository>()).unwrap();
        assert_eq!(by_type.lookup_name(), "customerRepository");
        assert_eq!(by_type.qualified_name(), type_name::<CustomerRepository>());
    }

    #[test]
    fn test_unknown_bean() {
        let (registry, _) = shop_registry();

        let err = registry.get("inventoryService").unwrap_err();
        assert!(matches!(err, RegistryError::BeanNotFound(ref name) if name == "inventoryService"));
        assert!(!registry.contains("PaymentService"));
    }

    #[test]
    fn test_by_category() {
        let (registry, _) = shop_registry();

        let services: Vec<_> = registry
            .by_category(Category::Service)
            .map(|d| d.lookup_name())
            .collect();
        assert_eq!(services, vec!["paymentService"]);
        assert_eq!(registry.by_category(Category::Component).count(), 0);
    }

    #[test]
    fn test_get_method_metadata() {
        let (registry, _) = shop_registry();
        let catalog = registry.get("catalogController").unwrap();

        let price_of = catalog.get_method("price_of").unwrap();
        assert_eq!(price_of.arity(), 2);
        assert!(price_of.parameter_types()[0].is::<String>());
        assert!(price_of.parameter_types()[1].is::<u32>());
        assert!(price_of.parameter_names().contains("quantity"));

        let err = catalog.get_method("discount").unwrap_err();
        assert!(matches!(err, RegistryError::MethodNotFound { ref method, .. } if method == "discount"));
    }

    // =============================================================================
    // FAILED REGISTRATION
    // =============================================================================

    #[test]
    fn test_unconstructible_component_is_left_out() {
        let (registry, _) = shop_registry();

        assert_eq!(registry.len(), 3);
        assert!(!registry.contains("smtpMailer"));
        assert_eq!(registry.failed(), &[type_name::<SmtpMailer>().to_string()]);
    }

    #[test]
    fn test_fail_fast_refuses_to_publish() {
        let (builder, _) = warm_up(RegistryConfig::default().with_fail_fast(true));

        match builder.build() {
            Err(RegistryError::Incomplete { failed }) => {
                assert_eq!(failed, vec![type_name::<SmtpMailer>().to_string()]);
            }
            other => panic!("Expected Incomplete, got {:?}", other.map(|r| r.len())),
        }
    }

    // =============================================================================
    // DYNAMIC INVOCATION
    // =============================================================================

    #[test]
    fn test_invoke_named_binds_by_parameter_name() -> anyhow::Result<()> {
        let (registry, _) = shop_registry();
        let catalog = registry.get("catalogController")?;

        let mut named = Map::new();
        named.insert("quantity".into(), json!(3));
        named.insert("sku".into(), json!("BOOK-42"));

        assert_eq!(catalog.invoke_named("price_of", &named)?, json!(36));
        Ok(())
    }

    #[test]
    fn test_invoke_rejects_bad_arguments() {
        let (registry, _) = shop_registry();
        let catalog = registry.get("catalogController").unwrap();

        assert!(matches!(
            catalog.invoke("price_of", &[json!("BOOK-1")]),
            Err(InvocationError::Arity {
                expected: 2,
                actual: 1,
                ..
            })
        ));
        assert!(matches!(
            catalog.invoke("price_of", &[json!("BOOK-1"), json!("two")]),
            Err(InvocationError::Argument {
                parameter: "quantity",
                ..
            })
        ));
        assert!(matches!(
            catalog.invoke("discount", &[]),
            Err(InvocationError::MethodNotFound(_))
        ));
    }

    // =============================================================================
    // CONCURRENT READERS
    // =============================================================================

    #[test]
    fn test_concurrent_calls_share_the_registry() {
        let (registry, journal) = shop_registry();
        let registry = Arc::new(registry);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let payments = registry
                        .get("paymentService")
                        .unwrap()
                        .effective_instance::<dyn PaymentApi>()
                        .unwrap();
                    payments.charge(25)
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok("ok".to_string()));
        }

        let payments = registry
            .get("paymentService")
            .unwrap()
            .raw_instance::<PaymentService>()
            .unwrap();
        assert_eq!(payments.balance(), PaymentService::OPENING_BALANCE - 100);

        // Every transaction opened is closed exactly once.
        let events = journal.events();
        assert_eq!(events.len(), 8);
        for begin in events.iter().filter(|e| e.phase == TransactionPhase::Begin) {
            let closing: Vec<_> = events
                .iter()
                .filter(|e| e.tx_id == begin.tx_id && e.phase != TransactionPhase::Begin)
                .collect();
            assert_eq!(closing.len(), 1);
            assert_eq!(closing[0].phase, TransactionPhase::Commit);
        }
    }
}
