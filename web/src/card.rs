use crate::scratch::ScratchReveal;
use crate::utils::Modal;
use scratch_reveal_core::{ResultSet, ScratchConfig};
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Draw,
    Revealed,
    Close,
}

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct CardProps {
    pub results: ResultSet,
    #[prop_or_default]
    pub config: ScratchConfig,
}

/// Scratch-card entry point: a draw button and the result dialog.
#[derive(Debug)]
pub(crate) struct CardView {
    modal_open: bool,
    revealed: bool,
}

impl Component for CardView {
    type Message = Msg;
    type Properties = CardProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            modal_open: false,
            revealed: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Draw => {
                log::debug!("scratch card drawn");
                self.modal_open = true;
                self.revealed = false;
                true
            }
            Revealed => {
                log::debug!("scratch card revealed");
                !std::mem::replace(&mut self.revealed, true)
            }
            Close => {
                let was_open = std::mem::replace(&mut self.modal_open, false);
                self.revealed = false;
                was_open
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let CardProps { results, config } = ctx.props().clone();
        let cb_draw = ctx.link().callback(|_: MouseEvent| Draw);
        let cb_close = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Close
        });
        let on_reveal = ctx.link().callback(|()| Revealed);

        html! {
            <div class="scratch-card">
                <p>{"刮开一张刮刮乐，看看你的运气！"}</p>
                <button onclick={cb_draw} disabled={self.modal_open}>{"刮一张"}</button>
                <Modal>
                    <dialog id="scratch-result" open={self.modal_open}>
                        <div class="backdrop" onclick={cb_close.clone()}/>
                        <article class={classes!(self.revealed.then_some("revealed"))}>
                            <header>
                                <h4>{"刮刮乐结果"}</h4>
                                <button aria-label="关闭" onclick={cb_close.clone()}>{"✕"}</button>
                            </header>
                            <ScratchReveal open={self.modal_open} {results} {config} {on_reveal}/>
                            <footer>
                                <button onclick={cb_close}>{"知道了"}</button>
                            </footer>
                        </article>
                    </dialog>
                </Modal>
            </div>
        }
    }
}
