//! Command handlers. Results go to stdout (JSON for data), logs to stderr.

use std::time::Duration;

use anyhow::{bail, Context};
use serde::Serialize;
use tracing::{info, info_span, Instrument};

use juke_app::view_state::AuthForm;
use juke_app::{AppDeps, UseCases};
use juke_core::onboarding::{CityLocation, OnboardingProfile};
use juke_core::playback::{ControlRequest, PlayRequest};
use juke_core::world::GlobeQuery;
use juke_core::{GatewayError, UiSessionState};

use crate::cli::{
    Command, ControlArgs, OnboardingArgs, OnboardingCommand, PlaybackAction, ProfileCommand,
    WorldCommand,
};

/// How long `status` waits for an onboarding refresh before printing anyway.
const STATUS_SETTLE_TIMEOUT: Duration = Duration::from_secs(20);

pub async fn run(command: Command, deps: &AppDeps) -> anyhow::Result<()> {
    let use_cases = UseCases::new(deps);

    match command {
        Command::Login { username, password } => {
            let form = AuthForm::new();
            form.update_username(username);
            form.update_password(password);
            submit_form(&form, &use_cases).await
        }
        Command::Register {
            username,
            email,
            password,
            confirm,
        } => {
            let form = AuthForm::new();
            form.toggle_mode();
            form.update_username(username);
            form.update_email(email);
            form.update_password(password);
            form.update_confirm(confirm);
            submit_form(&form, &use_cases).await
        }
        Command::Logout => {
            let controller = deps.session_controller();
            controller.logout().await;
            println!("Signed out.");
            Ok(())
        }
        Command::Status { watch } => status(deps, watch).await,
        Command::Verify {
            user_id,
            timestamp,
            signature,
        } => {
            let credential = use_cases
                .verify_registration()
                .execute(&user_id, &timestamp, &signature)
                .await
                .map_err(present)?;
            match credential {
                Some(credential) => println!("Account verified. Signed in as {}.", credential.username),
                None => println!("Account verified. You can now sign in."),
            }
            Ok(())
        }
        Command::Resend { email } => {
            let message = use_cases
                .resend_verification()
                .execute(&email)
                .await
                .map_err(present)?;
            println!("{message}");
            Ok(())
        }
        Command::Profile(command) => profile(&use_cases, command).await,
        Command::Onboarding(OnboardingCommand::Complete(args)) => {
            let completed_at = use_cases
                .complete_onboarding()
                .execute(&onboarding_answers(args))
                .await
                .map_err(present)?;
            println!("Onboarding completed at {completed_at}.");
            Ok(())
        }
        Command::Catalog { kind, query } => {
            let results = use_cases
                .search_catalog()
                .execute(kind, &query)
                .await
                .map_err(present)?;
            print_json(&results)
        }
        Command::Genres => {
            let genres = use_cases.featured_genres().execute().await.map_err(present)?;
            print_json(&genres)
        }
        Command::Playback(action) => playback(&use_cases, action).await,
        Command::World(command) => world(&use_cases, command).await,
    }
}

async fn submit_form(form: &AuthForm, use_cases: &UseCases<'_>) -> anyhow::Result<()> {
    let mode = form.state().mode;
    form.submit(&use_cases.login(), &use_cases.register())
        .instrument(info_span!("cli.auth_form", ?mode))
        .await;

    let state = form.state();
    if let Some(error) = state.error {
        bail!(error);
    }
    if let Some(message) = state.message {
        println!("{message}");
    }
    Ok(())
}

async fn status(deps: &AppDeps, watch: bool) -> anyhow::Result<()> {
    let controller = deps.session_controller();
    let mut states = controller.observe();

    let settled = tokio::time::timeout(
        STATUS_SETTLE_TIMEOUT,
        states.wait_for(|state| *state != UiSessionState::Loading),
    )
    .await;
    let state = match settled {
        Ok(Some(state)) => state,
        _ => controller.current(),
    };
    print_json(&state)?;

    if !watch {
        return Ok(());
    }

    info!("Watching session state; press Ctrl-C to stop");
    loop {
        tokio::select! {
            changed = states.changed() => match changed {
                Some(state) => print_json(&state)?,
                None => return Ok(()),
            },
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                return Ok(());
            }
        }
    }
}

async fn profile(use_cases: &UseCases<'_>, command: ProfileCommand) -> anyhow::Result<()> {
    match command {
        ProfileCommand::Me => {
            let profile = use_cases.fetch_my_profile().execute().await.map_err(present)?;
            print_json(&profile)
        }
        ProfileCommand::Show { username } => {
            let profile = use_cases
                .get_profile()
                .execute(&username)
                .await
                .map_err(present)?;
            print_json(&profile)
        }
        ProfileCommand::Search { query } => {
            let results = use_cases
                .search_profiles()
                .execute(&query)
                .await
                .map_err(present)?;
            print_json(&results)
        }
        ProfileCommand::Update { data } => {
            let patch: serde_json::Value =
                serde_json::from_str(&data).context("--data must be valid JSON")?;
            let profile = use_cases
                .update_my_profile()
                .execute(patch)
                .await
                .map_err(present)?;
            print_json(&profile)
        }
    }
}

async fn playback(use_cases: &UseCases<'_>, action: PlaybackAction) -> anyhow::Result<()> {
    let controls = use_cases.playback();
    let state = match action {
        PlaybackAction::Play(args) => {
            let request = PlayRequest {
                provider: args.control.provider,
                device_id: args.control.device_id,
                track_uri: args.track_uri,
                context_uri: args.context_uri,
                position_ms: args.position_ms,
            };
            controls.play(&request).await
        }
        PlaybackAction::Pause(args) => controls.pause(&control_request(args)).await,
        PlaybackAction::Next(args) => controls.next(&control_request(args)).await,
        PlaybackAction::Previous(args) => controls.previous(&control_request(args)).await,
        PlaybackAction::State { provider } => controls.state(provider.as_deref()).await,
    }
    .map_err(present)?;

    match state {
        Some(state) => print_json(&state),
        None => {
            println!("Nothing is playing.");
            Ok(())
        }
    }
}

async fn world(use_cases: &UseCases<'_>, command: WorldCommand) -> anyhow::Result<()> {
    match command {
        WorldCommand::Globe {
            zoom,
            limit,
            bounds,
        } => {
            let mut query = GlobeQuery::world(zoom).with_limit(limit);
            if let Some([min_lat, max_lat, min_lng, max_lng]) = bounds {
                query.min_lat = min_lat;
                query.max_lat = max_lat;
                query.min_lng = min_lng;
                query.max_lng = max_lng;
            }
            let points = use_cases
                .globe_points()
                .execute(&query)
                .await
                .map_err(present)?;
            print_json(&points)
        }
        WorldCommand::Online { limit, offset } => {
            let page = use_cases
                .online_users()
                .execute(limit, offset)
                .await
                .map_err(present)?;
            print_json(&page)
        }
    }
}

fn control_request(args: ControlArgs) -> ControlRequest {
    ControlRequest {
        provider: args.provider,
        device_id: args.device_id,
    }
}

fn onboarding_answers(args: OnboardingArgs) -> OnboardingProfile {
    let city = match (args.city, args.lat, args.lng) {
        (Some(name), Some(lat), Some(lng)) => Some(CityLocation { name, lat, lng }),
        _ => None,
    };
    OnboardingProfile {
        favorite_genres: args.genres,
        hated_genres: args.hated_genres,
        favorite_artists: args.artists,
        location_name: args.location,
        city,
        extras: args.extras.into_iter().collect(),
    }
}

/// Attach the user-facing message to a gateway error.
fn present(err: GatewayError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
