use std::{env, sync::OnceLock};

use ureq::{Agent, AgentBuilder, Proxy};

pub const SELF_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The agent behind the default transport, routed through `https_proxy` or
/// `http_proxy` when either is set to a usable proxy.
pub fn global_agent() -> &'static Agent {
	static AGENT: OnceLock<Agent> = OnceLock::new();

	AGENT.get_or_init(|| {
		let proxy = env::var("https_proxy").or_else(|_| env::var("http_proxy"));
		let agent_builder = AgentBuilder::new();

		if let Ok(env_proxy) = proxy {
			if let Ok(proxy) = Proxy::new(env_proxy) {
				return agent_builder.proxy(proxy).build();
			}
		}

		agent_builder.build()
	})
}
