/// 输出执行接口
///
/// 每次输出实际切换时调用一次，参数为新的输出状态。
/// 在 `tick` 的调用上下文中同步执行，实现中不能再回调滞回输出。
pub trait StateChanger {
    fn change_state(&mut self, state: bool);
}

impl<F: FnMut(bool)> StateChanger for F {
    fn change_state(&mut self, state: bool) {
        self(state)
    }
}
