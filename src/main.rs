//! Pokegraph - browse Pokemon from a GraphQL API in the terminal

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pokegraph::action::Action;
use pokegraph::api::{GraphqlClient, DEFAULT_ENDPOINT};
use pokegraph::components::{Component, PokedexView, PokedexViewProps, ViewAreas};
use pokegraph::config::Config;
use pokegraph::effect::Effect;
use pokegraph::logging;
use pokegraph::reducer::reducer;
use pokegraph::route::Route;
use pokegraph::state::{AppState, Focus, DEFAULT_LIST_SIZE, SPINNER_TICK_MS};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Pokegraph - a GraphQL Pokedex for the terminal
#[derive(Parser, Debug)]
#[command(name = "pokegraph")]
#[command(about = "Browse and filter Pokemon from a GraphQL API")]
struct Args {
    /// GraphQL endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Number of Pokemon to request (minimum 1)
    #[arg(long, short, default_value_t = DEFAULT_LIST_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    first: u32,

    /// Route to open at startup, e.g. `/pokemon/UG9rZW1vbjowMDE=`
    #[arg(long, default_value = "/")]
    route: Route,

    /// Append tracing output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = logging::DEFAULT_LOG_LEVEL)]
    log_level: String,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PokegraphComponentId {
    List,
    Search,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PokegraphContext {
    List,
    Search,
    Detail,
}

impl EventRoutingState<PokegraphComponentId, PokegraphContext> for AppState {
    fn focused(&self) -> Option<PokegraphComponentId> {
        Some(match self.focus() {
            Focus::List => PokegraphComponentId::List,
            Focus::Search => PokegraphComponentId::Search,
            Focus::Detail => PokegraphComponentId::Detail,
        })
    }

    fn modal(&self) -> Option<PokegraphComponentId> {
        match self.focus() {
            Focus::Detail => Some(PokegraphComponentId::Detail),
            _ => None,
        }
    }

    fn binding_context(&self, id: PokegraphComponentId) -> PokegraphContext {
        match id {
            PokegraphComponentId::List => PokegraphContext::List,
            PokegraphComponentId::Search => PokegraphContext::Search,
            PokegraphComponentId::Detail => PokegraphContext::Detail,
        }
    }

    fn default_context(&self) -> PokegraphContext {
        PokegraphContext::List
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        endpoint,
        first,
        route,
        log_file,
        log_level,
        debug: debug_args,
    } = Args::parse();

    logging::init(log_file.as_deref(), &log_level)?;

    let config = Config {
        endpoint,
        list_size: first,
        initial_route: route,
    };
    tracing::info!(
        endpoint = %config.endpoint,
        first = config.list_size,
        route = %config.initial_route,
        "starting"
    );

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let initial = config.initial_state();
    let state = debug
        .load_state_or_else_async(move || async move { Ok::<AppState, io::Error>(initial) })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        config.client(),
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("exited");
    Ok(())
}

struct PokegraphUi {
    view: PokedexView,
}

impl PokegraphUi {
    fn new() -> Self {
        Self {
            view: PokedexView::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PokegraphComponentId>,
    ) {
        let areas = ViewAreas::new(area);
        event_ctx.set_component_area(PokegraphComponentId::List, areas.list);
        event_ctx.set_component_area(PokegraphComponentId::Search, areas.search);
        if state.focus() == Focus::Detail {
            event_ctx.set_component_area(PokegraphComponentId::Detail, area);
        } else {
            event_ctx
                .component_areas
                .remove(&PokegraphComponentId::Detail);
        }

        let props = PokedexViewProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.view.render(frame, area, props);
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: GraphqlClient,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokegraphUi::new()));
    let mut bus: EventBus<AppState, Action, PokegraphComponentId, PokegraphContext> =
        EventBus::new();
    let keybindings: Keybindings<PokegraphContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(PokegraphComponentId::List, move |event, state| {
        let actions = ui_list
            .borrow_mut()
            .view
            .handle_list_event(&event.kind, state);
        handler_response(actions)
    });

    // The filter input swallows every key while focused
    let ui_search = Rc::clone(&ui);
    bus.register(PokegraphComponentId::Search, move |event, state| {
        let actions = ui_search
            .borrow_mut()
            .view
            .handle_search_event(&event.kind, state);
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(PokegraphComponentId::Detail, move |event, state| {
        let actions = ui_detail
            .borrow_mut()
            .view
            .handle_detail_event(&event.kind, state);
        handler_response(actions)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(&client, effect, ctx),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(client: &GraphqlClient, effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchPokemons { first } => {
            let client = client.clone();
            ctx.tasks().spawn("pokemons", async move {
                match client.fetch_pokemons(first).await {
                    Ok(pokemons) => {
                        tracing::info!(count = pokemons.len(), "pokemon list loaded");
                        Action::ListDidLoad(pokemons)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "pokemon list failed");
                        Action::ListDidError(e.to_string())
                    }
                }
            });
        }
        Effect::FetchPokemonDetails(request) => {
            // Replaces any in-flight request; late results are also dropped by seq
            ctx.tasks().cancel(&TaskKey::new("pokemon_details"));
            let client = client.clone();
            ctx.tasks().spawn("pokemon_details", async move {
                let seq = request.seq;
                match client
                    .fetch_pokemon_details(request.id.as_deref(), request.name.as_deref())
                    .await
                {
                    Ok(details) => Action::DetailDidLoad { seq, details },
                    Err(e) => {
                        tracing::warn!(seq, id = ?request.id, error = %e, "pokemon details failed");
                        Action::DetailDidError {
                            seq,
                            error: e.to_string(),
                        }
                    }
                }
            });
        }
    }
}
