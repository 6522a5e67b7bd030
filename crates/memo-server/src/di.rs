//! Dependency injection module using Shaku.
//!
//! One module holds the whole process: the MySQL pool and store, the Redis
//! cache (or its disabled stand-in), password digests, tokens, and the
//! services built on them.

use deadpool_redis::{Pool, PoolConfig, Runtime};
use memo_config::{AppConfig, RedisConfig, SecurityConfig};
use memo_core::{module, HasComponent, MemoError, MemoResult};
use memo_repository::{DatabasePool, DatabasePoolInterface, DatabasePoolParameters, MemoStore, MySqlMemoStore};
use memo_security::{PasswordDigest, TokenProvider, TokenProviderInterface};
use memo_service::{
    AuthService, AuthServiceComponent, KeyValueCache, MemoService, MemoServiceComponent, RedisCacheService,
    RedisCacheServiceParameters,
};
use sqlx::mysql::MySqlPool;
use std::sync::Arc;
use tracing::info;

module! {
    pub MemoModule {
        components = [
            DatabasePool,
            MySqlMemoStore,
            RedisCacheService,
            PasswordDigest,
            TokenProvider,
            MemoServiceComponent,
            AuthServiceComponent,
        ],
        providers = [],
    }
}

/// Connects the database and builds the module from configuration.
pub async fn build_memo_module(config: &AppConfig) -> MemoResult<Arc<MemoModule>> {
    let db_pool = DatabasePool::new(&config.database).await?;
    let cache_pool = create_redis_pool(&config.redis)?;

    let module = assemble_module(db_pool.inner().clone(), cache_pool, config.security.clone());
    Ok(Arc::new(module))
}

/// Builds the module from already-created pools.
pub fn assemble_module(
    db_pool: MySqlPool,
    cache_pool: Option<Arc<Pool>>,
    security_config: SecurityConfig,
) -> MemoModule {
    let token_provider = TokenProvider::new(Arc::new(security_config));

    MemoModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters { pool: db_pool })
        .with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters { pool: cache_pool })
        .with_component_parameters::<TokenProvider>(token_provider.into_parameters())
        .build()
}

/// Creates the Redis pool, or `None` when the cache is disabled.
///
/// No connection is opened here; an unreachable Redis surfaces on first use
/// and the read path falls back to the store.
pub fn create_redis_pool(config: &RedisConfig) -> MemoResult<Option<Arc<Pool>>> {
    if !config.enabled {
        info!("Redis cache disabled, every read goes to the store");
        return Ok(None);
    }

    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(PoolConfig::new(config.pool_size));
    let pool = redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| MemoError::Cache(format!("Failed to create Redis pool: {}", e)))?;

    info!("Redis cache pool created for {}", config.url);
    Ok(Some(Arc::new(pool)))
}

// ============================================================================
// Module Resolution Helpers
// ============================================================================

/// Trait for resolving the services from a module.
pub trait ServiceResolver {
    /// Resolves the memo service from the module.
    fn memo_service(&self) -> Arc<dyn MemoService>;

    /// Resolves the auth service from the module.
    fn auth_service(&self) -> Arc<dyn AuthService>;
}

impl ServiceResolver for MemoModule {
    fn memo_service(&self) -> Arc<dyn MemoService> {
        self.resolve()
    }

    fn auth_service(&self) -> Arc<dyn AuthService> {
        self.resolve()
    }
}

/// Trait for resolving storage components.
pub trait StorageResolver {
    /// Resolves the database pool from the module.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;

    /// Resolves the memo store from the module.
    fn memo_store(&self) -> Arc<dyn MemoStore>;

    /// Resolves the key/value cache from the module.
    fn cache(&self) -> Arc<dyn KeyValueCache>;
}

impl StorageResolver for MemoModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }

    fn memo_store(&self) -> Arc<dyn MemoStore> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn KeyValueCache> {
        self.resolve()
    }
}

/// Trait for resolving security components.
pub trait SecurityResolver {
    /// Resolves the token provider from the module.
    fn token_provider(&self) -> Arc<dyn TokenProviderInterface>;
}

impl SecurityResolver for MemoModule {
    fn token_provider(&self) -> Arc<dyn TokenProviderInterface> {
        self.resolve()
    }
}
