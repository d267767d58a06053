use crate::session::{Msg, Session};
use crate::storage::LocalStore;
use qwixx_core as game;
use game::{CellIndex, RowColor};
use yew::prelude::*;

const RESET_PROMPT: &str =
    "Are you sure you want to reset your board? Your game progress will be permanently lost.";
const ABOUT_TEXT: &str = "Qwixx\u{2122} is a game published by Gamewright, played with 6 dice and a \
    board for each player. This app is a digital replacement for the original paper boards.";
const RULES_URL: &str = "https://www.ultraboardgames.com/qwixx/game-rules.php";

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct ScorePadProps {
    pub seed: u64,
}

pub(crate) struct ScorePad {
    session: Session<LocalStore>,
}

impl ScorePad {
    fn view_cell(&self, ctx: &Context<Self>, color: RowColor, index: CellIndex) -> Html {
        let row = self.session.board.row(color);
        let marked = row.is_marked(index);
        let legal = row.is_cell_legal_to_toggle(index);
        let text = match color.numbering().value_at(index) {
            _ if marked => "\u{2717}".to_string(),
            Some(value) => value.to_string(),
            None => String::new(),
        };
        let onclick = ctx
            .link()
            .callback(move |_: MouseEvent| Msg::ToggleMark(color, index));

        html! {
            <button
                class={classes!("cell", marked.then_some("marked"))}
                disabled={!legal}
                {onclick}
            >
                { text }
            </button>
        }
    }

    fn view_row(&self, ctx: &Context<Self>, color: RowColor) -> Html {
        let row = self.session.board.row(color);
        let lock_symbol = if row.is_locked() && !row.is_lock_cell_marked() {
            "\u{1F512}"
        } else if row.is_lock_cell_marked() {
            "\u{2717}"
        } else {
            "\u{1F513}"
        };
        let on_lock = ctx
            .link()
            .callback(move |_: MouseEvent| Msg::ToggleLock(color));

        html! {
            <div class={classes!("row", color.name(), row.is_locked().then_some("locked"))}>
                { for (0..=game::LOCK_INDEX).map(|index| self.view_cell(ctx, color, index)) }
                <button class="lock" onclick={on_lock}>{ lock_symbol }</button>
            </div>
        }
    }

    fn view_penalties(&self, ctx: &Context<Self>) -> Html {
        let marks = self.session.board.penalty_marks();

        html! {
            <div class="row penalties">
                <label>{"PENALTIES:"}</label>
                {
                    for (0..game::PENALTY_COUNT as game::PenaltyIndex).map(|index| {
                        let marked = marks[usize::from(index)];
                        let text = if marked { "\u{2717}" } else { "" };
                        let onclick = ctx
                            .link()
                            .callback(move |_: MouseEvent| Msg::TogglePenalty(index));
                        html! {
                            <button class={classes!("cell", marked.then_some("marked"))} {onclick}>
                                { text }
                            </button>
                        }
                    })
                }
            </div>
        }
    }

    fn view_scores(&self) -> Html {
        if self.session.board.score_hidden() {
            return html! {
                <div class="row score-table">
                    {
                        for game::score_table().into_iter().map(|(count, points)| html! {
                            <span class="points">{ format!("{}X", count) }<hr/>{ points.to_string() }</span>
                        })
                    }
                </div>
            };
        }

        let sheet = self.session.board.score_sheet();
        html! {
            <div class="row totals">
                <label>{"TOTALS:"}</label>
                {
                    for RowColor::ALL.into_iter().enumerate().map(|(i, color)| html! {
                        <>
                            if i > 0 { <span>{"+"}</span> }
                            <output class={classes!("score", color.name())}>{ sheet.row(color).to_string() }</output>
                        </>
                    })
                }
                <span>{"-"}</span>
                <output class="score penalty">{ sheet.penalty.to_string() }</output>
                <span>{"="}</span>
                <output class="score total">{ sheet.total.to_string() }</output>
            </div>
        }
    }

    fn view_dice(&self, ctx: &Context<Self>) -> Html {
        let on_roll = ctx.link().callback(|_: MouseEvent| Msg::Roll);
        let roll_count = self.session.roll_count;

        html! {
            <div class="dice">
                <button class="roll" onclick={on_roll}>{"Roll \u{1F3B2}"}</button>
                {
                    for self.session.dice.iter().map(|(color, face)| html! {
                        <span key={format!("{}-{}", color.name(), roll_count)} class={classes!("die", color.name())}>
                            { face.glyph().to_string() }
                        </span>
                    })
                }
            </div>
        }
    }
}

impl Component for ScorePad {
    type Message = Msg;
    type Properties = ScorePadProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            session: Session::load(LocalStore, ctx.props().seed),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        if msg == Msg::Reset && !gloo::dialogs::confirm(RESET_PROMPT) {
            log::debug!("reset cancelled");
            return false;
        }

        self.session.apply(msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let score_hidden = self.session.board.score_hidden();
        let on_score = ctx.link().callback(|_: MouseEvent| Msg::ToggleScoreHidden);
        let on_reset = ctx.link().callback(|_: MouseEvent| Msg::Reset);
        let score_label = format!("Auto Score ({})", if score_hidden { "OFF" } else { "ON" });

        html! {
            <main class="qwixx">
                <section class="board">
                    <header>
                        <strong>{"QWIXX\u{2122}"}</strong>
                        <button onclick={on_score}>{ score_label }</button>
                        <button class="reset" onclick={on_reset}>{"Reset"}</button>
                        <details class="about">
                            <summary>{"About"}</summary>
                            <p>{ ABOUT_TEXT }</p>
                            <a href={RULES_URL} target="_blank" rel="noopener">{"Read the rules here."}</a>
                        </details>
                    </header>
                    { for RowColor::ALL.into_iter().map(|color| self.view_row(ctx, color)) }
                    { self.view_penalties(ctx) }
                    { self.view_scores() }
                </section>
                { self.view_dice(ctx) }
            </main>
        }
    }
}
