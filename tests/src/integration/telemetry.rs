//! # Logging Bootstrap Flow
//!
//! A host installs the subscriber from `bean-telemetry`, then warms up the
//! registry; the registry's own log lines and the `log_event!` helper go
//! through the installed subscriber.

#[cfg(test)]
mod tests {
    use bean_registry::{Category, RegistryBuilder, RegistryConfig};
    use bean_telemetry::{init_logging, log_event, TelemetryConfig, TelemetryError};

    use crate::integration::fixtures::{CatalogController, PaymentApi, PaymentService};

    #[test]
    fn test_host_startup_with_logging() -> anyhow::Result<()> {
        let config = TelemetryConfig {
            log_level: "bean_registry=debug,info".to_string(),
            console_output: false,
            ..TelemetryConfig::for_service("shop")
        };

        // Another test in this binary may have installed a subscriber first.
        match init_logging(&config) {
            Ok(()) | Err(TelemetryError::SubscriberInit(_)) => {}
            Err(e) => return Err(e.into()),
        }

        let mut builder = RegistryBuilder::new(RegistryConfig::from_env());
        builder.register::<PaymentService>(Category::Service)?;
        builder.register::<CatalogController>(Category::Controller)?;
        let registry = builder.build()?;

        for descriptor in registry.iter() {
            log_event!(
                INFO,
                descriptor.lookup_name(),
                "Bean ready",
                intercepted = descriptor.is_intercepted()
            );
        }

        let payments = registry
            .get("paymentService")?
            .effective_instance::<dyn PaymentApi>()
            .expect("payment capability");
        assert_eq!(payments.charge(40), Ok("ok".to_string()));
        Ok(())
    }

    #[test]
    fn test_invalid_level_is_a_config_error() {
        let config = TelemetryConfig {
            log_level: "bean_registry=loud".to_string(),
            ..TelemetryConfig::default()
        };

        if std::env::var("RUST_LOG").is_err() {
            assert!(matches!(
                init_logging(&config),
                Err(TelemetryError::Config(_))
            ));
        }
    }
}
