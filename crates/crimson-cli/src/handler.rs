//! Command handler for the crimson shell

use crimsoncache::Cache;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::reply::Reply;

pub type SharedCache = Arc<Mutex<Cache<String, String>>>;

pub struct CommandHandler {
    cache: SharedCache,
}

impl CommandHandler {
    pub fn new(cache: SharedCache) -> Self {
        Self { cache }
    }

    pub fn handle(&self, args: &[String]) -> Reply {
        let Some(command) = args.first() else {
            return Reply::Error("ERR empty command".to_string());
        };

        let command = command.to_uppercase();
        let args = &args[1..];

        match command.as_str() {
            "PING" => self.handle_ping(args),
            "PUT" | "SET" => self.handle_put(args),
            "GET" => self.handle_get(args),
            "PEEK" => self.handle_peek(args),
            "EXISTS" => self.handle_exists(args),
            "DEL" => self.handle_del(args),
            "LEN" | "DBSIZE" => self.handle_len(),
            "KEYS" => self.handle_keys(),
            "CLEAR" | "FLUSHDB" => self.handle_clear(),
            "INFO" | "STATS" => self.handle_info(),
            _ => Reply::Error(format!("ERR unknown command '{}'", command)),
        }
    }

    fn handle_ping(&self, args: &[String]) -> Reply {
        match args {
            [] => Reply::Status("PONG".to_string()),
            [message] => Reply::Value(Some(message.clone())),
            _ => wrong_arity("ping"),
        }
    }

    /// Unquoted value tokens are joined with single spaces; quote the value
    /// to keep runs of whitespace.
    fn handle_put(&self, args: &[String]) -> Reply {
        if args.len() < 2 {
            return wrong_arity("put");
        }

        let key = args[0].clone();
        let value = args[1..].join(" ");

        match self.cache.lock().put(key, value) {
            Ok(()) => Reply::Status("OK".to_string()),
            Err(e) => Reply::Error(format!("ERR {}", e)),
        }
    }

    fn handle_get(&self, args: &[String]) -> Reply {
        let [key] = args else {
            return wrong_arity("get");
        };

        Reply::Value(self.cache.lock().get(key.as_str()).cloned())
    }

    fn handle_peek(&self, args: &[String]) -> Reply {
        let [key] = args else {
            return wrong_arity("peek");
        };

        Reply::Value(self.cache.lock().peek(key.as_str()).cloned())
    }

    fn handle_exists(&self, args: &[String]) -> Reply {
        if args.is_empty() {
            return wrong_arity("exists");
        }

        let mut cache = self.cache.lock();
        let count = args
            .iter()
            .filter(|key| cache.contains(key.as_str()))
            .count();

        Reply::Integer(count as i64)
    }

    fn handle_del(&self, args: &[String]) -> Reply {
        if args.is_empty() {
            return wrong_arity("del");
        }

        let mut cache = self.cache.lock();
        let deleted = args
            .iter()
            .filter(|key| cache.remove(key.as_str()).is_some())
            .count();

        Reply::Integer(deleted as i64)
    }

    fn handle_len(&self) -> Reply {
        Reply::Integer(self.cache.lock().len() as i64)
    }

    fn handle_keys(&self) -> Reply {
        Reply::List(self.cache.lock().keys().cloned().collect())
    }

    fn handle_clear(&self) -> Reply {
        self.cache.lock().clear();
        Reply::Status("OK".to_string())
    }

    fn handle_info(&self) -> Reply {
        let cache = self.cache.lock();
        let stats = cache.stats();
        let info = format!(
            "# Server\n\
             crimson_version:{}\n\
             strategy:{}\n\
             \n\
             # Stats\n\
             cache_size:{}\n\
             cache_capacity:{}\n\
             cache_hits:{}\n\
             cache_misses:{}\n\
             cache_hit_ratio:{:.2}\n\
             cache_inserts:{}\n\
             cache_updates:{}\n\
             cache_evictions:{}\n",
            env!("CARGO_PKG_VERSION"),
            cache.strategy_name().unwrap_or("none"),
            cache.len(),
            cache.capacity(),
            stats.hits(),
            stats.misses(),
            stats.hit_ratio(),
            stats.inserts(),
            stats.updates(),
            stats.evictions(),
        );
        Reply::Text(info)
    }
}

fn wrong_arity(command: &str) -> Reply {
    Reply::Error(format!(
        "ERR wrong number of arguments for '{}' command",
        command
    ))
}
